//! Site configuration: the `blog.yaml` file naming the site, its author, and
//! the absolute root URL used for feed links. Located by walking up from a
//! starting directory, so the binary can run from anywhere inside the
//! project.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use url::Url;

const CONFIG_FILE: &str = "blog.yaml";

#[derive(Clone, Debug, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// The site title, shown in the page head and the feed.
    pub title: String,

    /// The absolute URL the site is served under. Post links in the feed
    /// are joined onto this.
    pub site_root: Url,

    #[serde(default)]
    pub author: Option<Author>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config> {
        let file = File::open(path)
            .with_context(|| format!("Opening site file `{}`", path.display()))?;
        serde_yaml::from_reader(file)
            .with_context(|| format!("Parsing site file `{}`", path.display()))
    }

    /// Finds `blog.yaml` in `dir` or the nearest ancestor directory.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Config::from_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    CONFIG_FILE
                )),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_config() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "title: Test Blog\nsite_root: \"https://example.org/\"\nauthor:\n  name: Tester\n",
        )?;
        let config = Config::from_directory(dir.path())?;
        assert_eq!(config.title, "Test Blog");
        assert_eq!(config.site_root.as_str(), "https://example.org/");
        assert_eq!(config.author.unwrap().name, "Tester");
        Ok(())
    }

    #[test]
    fn test_config_found_from_subdirectory() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "title: Nested\nsite_root: \"https://example.org/\"\n",
        )?;
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested)?;
        let config = Config::from_directory(&nested)?;
        assert_eq!(config.title, "Nested");
        Ok(())
    }
}
