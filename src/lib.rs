pub mod diag;
pub mod feedline;
pub mod geometry;
pub mod matching;
pub mod optimize;
pub mod perf;
pub mod refdata;
pub mod web;
