pub mod post;
pub mod scene;
pub mod gallery;
pub mod performer;
