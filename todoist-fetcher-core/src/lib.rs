// SPDX-License-Identifier: MIT

pub mod client;
mod error;
pub mod filter;
pub mod folders;
pub mod pipeline;
pub mod report;
pub mod task;
pub use error::Error;
