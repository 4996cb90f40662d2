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

//! The errors that can occur when a scoring run is configured, loaded or executed.
//! Most errors are floated up from `PixelCloud` as that's the i/o layer.

use pixelcloud::errors::PixelCloudError;
use std::error::Error;
use std::fmt;
use std::io;

/// Helper type for a call that could go wrong.
pub type ShardKnnResult<T> = Result<T, ShardKnnError>;

/// Error type for a scoring run. Every variant is terminal, nothing retries.
#[derive(Debug)]
pub enum ShardKnnError {
    /// Unable to retrieve some data point or label, floated up from the data layer
    PixelCloudError(PixelCloudError),
    /// IO error
    IoError(io::Error),
    /// A command line value that doesn't make a runnable configuration
    ConfigError(String),
    /// A dataset file refused to load
    LoadError {
        /// The file that refused
        path: String,
        /// What went wrong decoding it
        source: PixelCloudError,
    },
    /// Could not create a worker thread
    ResourceError {
        /// The worker that could not be created
        worker: usize,
        /// The failure as reported by the runtime
        message: String,
    },
    /// A channel endpoint disconnected before the protocol completed
    ChannelError {
        /// The worker on the other end
        worker: usize,
        /// Which handoff was cut short
        message: &'static str,
    },
    /// A worker terminated with a failure status
    WorkerFailure {
        /// The worker that failed
        worker: usize,
        /// The failure it reported
        message: String,
    },
    /// The training cloud has no points to vote with
    EmptyTrainingSet,
}

impl fmt::Display for ShardKnnError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShardKnnError::PixelCloudError(ref e) => write!(f, "{}", e),
            ShardKnnError::IoError(ref e) => write!(f, "{}", e),
            ShardKnnError::ConfigError(ref message) => write!(f, "{}", message),
            ShardKnnError::LoadError {
                ref path,
                ref source,
            } => write!(f, "the data set in {} could not be loaded: {}", path, source),
            ShardKnnError::ResourceError {
                worker,
                ref message,
            } => write!(f, "could not create worker {}: {}", worker, message),
            ShardKnnError::ChannelError { worker, message } => {
                write!(f, "worker {}: {}", worker, message)
            }
            ShardKnnError::WorkerFailure {
                worker,
                ref message,
            } => write!(f, "worker {} failed: {}", worker, message),
            ShardKnnError::EmptyTrainingSet => {
                write!(f, "the training set holds no points to vote with")
            }
        }
    }
}

#[allow(deprecated)]
impl Error for ShardKnnError {
    fn description(&self) -> &str {
        match self {
            ShardKnnError::PixelCloudError(ref e) => e.description(),
            ShardKnnError::IoError(ref e) => e.description(),
            ShardKnnError::ConfigError(..) => "a command line value was not usable",
            ShardKnnError::LoadError { .. } => "a dataset file refused to load",
            ShardKnnError::ResourceError { .. } => "could not create a worker",
            ShardKnnError::ChannelError { .. } => "a channel disconnected mid protocol",
            ShardKnnError::WorkerFailure { .. } => "a worker terminated with a failure status",
            ShardKnnError::EmptyTrainingSet => "the training set holds no points to vote with",
        }
    }

    fn cause(&self) -> Option<&dyn Error> {
        match self {
            ShardKnnError::PixelCloudError(ref e) => Some(e),
            ShardKnnError::IoError(ref e) => Some(e),
            ShardKnnError::LoadError { ref source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<PixelCloudError> for ShardKnnError {
    fn from(err: PixelCloudError) -> Self {
        ShardKnnError::PixelCloudError(err)
    }
}

impl From<io::Error> for ShardKnnError {
    fn from(err: io::Error) -> Self {
        ShardKnnError::IoError(err)
    }
}
