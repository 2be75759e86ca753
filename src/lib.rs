//! The library code for `blogview`, the listing front-end for my personal
//! blog. The listing is an immutable set of post metadata records rendered
//! into named regions of a document, filtered client-side by category and
//! tag. The architecture can be broken down into three layers:
//!
//! 1. Data: the validated, immutable [`post::Store`] and the pure view
//!    computations over it ([`filter`] for the visible subset, [`aggregate`]
//!    for category counts and the tag cloud).
//! 2. Presentation: typed view-models ([`view`]) rendered through templates
//!    ([`render`]) into the named container regions of a [`document`].
//! 3. Interaction: the [`controller`], which owns the mutable category/tag
//!    selection and answers click actions with scoped re-renders.
//!
//! On top of those sit the static outputs: [`site`] assembles the initial
//! listing into a complete page, and [`feed`] produces the Atom feed.
//!
//! Everything runs synchronously on the caller's thread; a render cycle
//! completes before the next event is processed, and the only mutable state
//! anywhere is the controller's selection.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod aggregate;
pub mod config;
pub mod controller;
pub mod document;
pub mod feed;
pub mod filter;
pub mod post;
pub mod render;
pub mod site;
pub mod view;
