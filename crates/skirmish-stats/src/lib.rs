//! Summary statistics over training results.
//!
//! Training produces one cumulative reward per episode and one average per evaluation block.
//! This crate condenses such series into a few numbers for logs and reports.
//!
//! # Modules
//!
//! - [`descriptive`]: Minimum, maximum, mean, median and spread of a series
//!
//! # Examples
//!
//! ```
//! use skirmish_stats::descriptive::DescriptiveStats;
//!
//! let rewards = [-12.5, 40.0, 87.5];
//! let stats = DescriptiveStats::new(rewards).unwrap();
//! assert_eq!(stats.count, 3);
//! assert_eq!(stats.median, 40.0);
//! ```

pub mod descriptive;
