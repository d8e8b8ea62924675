pub mod history;
pub mod import;
pub mod learn;
pub mod learned;
pub mod quiz;
pub mod review;
pub mod search;
pub mod show;
pub mod stats;
pub mod today;
