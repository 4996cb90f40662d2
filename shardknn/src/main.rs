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

//! The classifier binary. On success the only stdout is one line holding the
//! total number of correctly predicted test labels; every failure goes to
//! stderr and exits with status 1.

use std::process;
use std::sync::Arc;

use clap::Parser;
use log::debug;

use pixelcloud::loaders::labeled_ram_from_file;
use pixelcloud::{Cosine, DefaultLabeledCloud, Metric, L2};

use shardknn::config::{Args, Config, SelectedMetric};
use shardknn::coordinator::Coordinator;
use shardknn::errors::{ShardKnnError, ShardKnnResult};

const USAGE: &str =
    "Usage: classifier -v -K <num> -d <distance metric> -p <num_procs> training_file testing_file";

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("classifier: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    pretty_env_logger::formatted_builder()
        .filter_level(if config.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let outcome = match config.metric {
        SelectedMetric::Euclidean => run::<L2>(&config),
        SelectedMetric::Cosine => run::<Cosine>(&config),
    };
    match outcome {
        Ok(total_correct) => println!("{}", total_correct),
        Err(e) => {
            eprintln!("classifier: {}", e);
            process::exit(1);
        }
    }
}

fn run<M: Metric>(config: &Config) -> ShardKnnResult<u64> {
    debug!("loading datasets");
    let training: DefaultLabeledCloud<M> =
        labeled_ram_from_file(&config.training).map_err(|e| ShardKnnError::LoadError {
            path: config.training.to_string_lossy().to_string(),
            source: e,
        })?;
    let testing: DefaultLabeledCloud<M> =
        labeled_ram_from_file(&config.testing).map_err(|e| ShardKnnError::LoadError {
            path: config.testing.to_string_lossy().to_string(),
            source: e,
        })?;

    let coordinator = Coordinator::new(
        Arc::new(training),
        Arc::new(testing),
        config.k,
        config.procs,
    );
    coordinator.run()
}
