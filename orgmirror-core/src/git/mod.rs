//! Git operations for orgmirror
//!
//! Read-only inspection goes through git2; anything that touches remotes
//! or the working tree runs the `git` executable through [`crate::exec`].

mod clone_url;
mod repo;

pub use clone_url::repo_name_from_url;
pub use repo::GitRepo;
