pub mod annotate;
pub mod cli;
pub mod error;
pub mod html;
pub mod input;
pub mod model;
pub mod profile;
pub mod tree;
