/*
* Licensed to Elasticsearch B.V. under one or more contributor
* license agreements. See the NOTICE file distributed with
* this work for additional information regarding copyright
* ownership. Elasticsearch B.V. licenses this file to you under
* the Apache License, Version 2.0 (the "License"); you may
* not use this file except in compliance with the License.
* You may obtain a copy of the License at
*
*  http://www.apache.org/licenses/LICENSE-2.0
*
* Unless required by applicable law or agreed to in writing,
* software distributed under the License is distributed on an
* "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
* KIND, either express or implied.  See the License for the
* specific language governing permissions and limitations
* under the License.
*/

//! Command line configuration for the classifier binary.

use std::path::PathBuf;

use clap::Parser;

use crate::errors::{ShardKnnError, ShardKnnResult};

/// The distance metric a run scores with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedMetric {
    /// Straight line distance
    Euclidean,
    /// One minus the cosine similarity
    Cosine,
}

/// Resolves a user supplied metric name by case sensitive prefix match
/// against the canonical names, so `eucl` and `cos` both work.
pub fn resolve_metric(name: &str) -> ShardKnnResult<SelectedMetric> {
    if "euclidean".starts_with(name) {
        return Ok(SelectedMetric::Euclidean);
    }
    if "cosine".starts_with(name) {
        return Ok(SelectedMetric::Cosine);
    }
    Err(ShardKnnError::ConfigError(format!(
        "expected any initial substring of \"euclidean\" or \"cosine\" as argument for -d, got {:?}",
        name
    )))
}

/// Raw command line arguments, as typed.
#[derive(Debug, Parser)]
#[command(
    name = "classifier",
    about = "Scores a testing set against a training set with a kNN vote split across workers"
)]
pub struct Args {
    /// K value for the kNN vote
    #[arg(short = 'K', value_name = "num", default_value_t = 1)]
    pub k: i64,

    /// Distance metric, any initial substring of "euclidean" or "cosine"
    #[arg(short = 'd', value_name = "distance metric", default_value = "euclidean")]
    pub metric: String,

    /// Number of workers to spread the testing set over
    #[arg(short = 'p', value_name = "num_procs", default_value_t = 1)]
    pub procs: i64,

    /// Print extra diagnostics on stderr
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Binary training dataset
    #[arg(value_name = "training_file")]
    pub training: PathBuf,

    /// Binary testing dataset
    #[arg(value_name = "testing_file")]
    pub testing: PathBuf,
}

/// A validated, runnable configuration.
#[derive(Debug)]
pub struct Config {
    /// K value for the kNN vote
    pub k: usize,
    /// The resolved distance metric
    pub metric: SelectedMetric,
    /// Worker count, at least 1
    pub procs: usize,
    /// Extra diagnostics on stderr
    pub verbose: bool,
    /// Binary training dataset path
    pub training: PathBuf,
    /// Binary testing dataset path
    pub testing: PathBuf,
}

impl Config {
    /// Validates raw arguments into a runnable configuration.
    pub fn from_args(args: Args) -> ShardKnnResult<Config> {
        if args.k < 1 {
            return Err(ShardKnnError::ConfigError(format!(
                "-K must be at least 1, got {}",
                args.k
            )));
        }
        if args.procs < 1 {
            return Err(ShardKnnError::ConfigError(format!(
                "-p must be at least 1, got {}",
                args.procs
            )));
        }
        let metric = resolve_metric(&args.metric)?;
        Ok(Config {
            k: args.k as usize,
            metric,
            procs: args.procs as usize,
            verbose: args.verbose,
            training: args.training,
            testing: args.testing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> ShardKnnResult<Config> {
        let args = Args::try_parse_from(argv).map_err(|e| {
            ShardKnnError::ConfigError(e.to_string())
        })?;
        Config::from_args(args)
    }

    #[test]
    fn metric_prefixes_resolve() {
        assert_eq!(resolve_metric("euclidean").unwrap(), SelectedMetric::Euclidean);
        assert_eq!(resolve_metric("eucl").unwrap(), SelectedMetric::Euclidean);
        assert_eq!(resolve_metric("e").unwrap(), SelectedMetric::Euclidean);
        assert_eq!(resolve_metric("cosine").unwrap(), SelectedMetric::Cosine);
        assert_eq!(resolve_metric("cos").unwrap(), SelectedMetric::Cosine);
    }

    #[test]
    fn unknown_metric_is_rejected() {
        assert!(resolve_metric("manhattan").is_err());
        assert!(resolve_metric("Eucl").is_err());
        assert!(resolve_metric("euclideanx").is_err());
    }

    #[test]
    fn defaults_are_one_worker_one_neighbor_euclidean() {
        let config = parse(&["classifier", "train.bin", "test.bin"]).unwrap();
        assert_eq!(config.k, 1);
        assert_eq!(config.procs, 1);
        assert_eq!(config.metric, SelectedMetric::Euclidean);
        assert!(!config.verbose);
    }

    #[test]
    fn options_may_come_in_any_order() {
        let config = parse(&[
            "classifier",
            "-p",
            "3",
            "-v",
            "-K",
            "5",
            "-d",
            "cos",
            "train.bin",
            "test.bin",
        ])
        .unwrap();
        assert_eq!(config.k, 5);
        assert_eq!(config.procs, 3);
        assert_eq!(config.metric, SelectedMetric::Cosine);
        assert!(config.verbose);
    }

    #[test]
    fn nonpositive_worker_counts_are_config_errors() {
        assert!(parse(&["classifier", "-p", "0", "train.bin", "test.bin"]).is_err());
        assert!(parse(&["classifier", "-p", "-2", "train.bin", "test.bin"]).is_err());
    }

    #[test]
    fn nonpositive_k_is_a_config_error() {
        assert!(parse(&["classifier", "-K", "0", "train.bin", "test.bin"]).is_err());
    }

    #[test]
    fn missing_dataset_arguments_are_rejected() {
        assert!(parse(&["classifier", "train.bin"]).is_err());
    }
}
