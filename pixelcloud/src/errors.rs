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

//! The errors that can occur when a pixel cloud is loading or working
use std::error::Error;
use std::fmt;
use std::io;

///
pub type PixelCloudResult<T> = Result<T, PixelCloudError>;

/// Error type for the pixel cloud
#[derive(Debug)]
pub enum PixelCloudError {
    /// Unable to retrieve some data point (given by index) in a file (slice name)
    DataAccessError {
        /// Index of access error
        index: usize,
        /// File that had the access error
        slice_name: String,
    },
    /// IO error when opening files
    IoError(io::Error),
    /// Parsing error when loading a binary dataset file
    ParsingError(ParsingError),
}

impl fmt::Display for PixelCloudError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &PixelCloudError::IoError(ref e) => write!(f, "{}", e),
            &PixelCloudError::ParsingError(ref e) => write!(f, "{}", e),
            &PixelCloudError::DataAccessError { index, ref slice_name } => {
                write!(
                    f,
                    "there was an issue grabbing point or label {} from {}",
                    index, slice_name
                )
            }
        }
    }
}

#[allow(deprecated)]
impl Error for PixelCloudError {
    fn description(&self) -> &str {
        match self {
            &PixelCloudError::IoError(ref e) => e.description(),
            &PixelCloudError::ParsingError(ref e) => e.description(),
            &PixelCloudError::DataAccessError { .. } => {
                "there was an issue grabbing a data point or label"
            }
        }
    }

    fn cause(&self) -> Option<&dyn Error> {
        match self {
            &PixelCloudError::IoError(ref e) => Some(e),
            &PixelCloudError::ParsingError(ref e) => Some(e),
            &PixelCloudError::DataAccessError { .. } => None,
        }
    }
}

impl From<io::Error> for PixelCloudError {
    fn from(err: io::Error) -> Self {
        PixelCloudError::IoError(err)
    }
}

impl From<ParsingError> for PixelCloudError {
    fn from(err: ParsingError) -> Self {
        PixelCloudError::ParsingError(err)
    }
}

impl From<PixelCloudError> for io::Error {
    fn from(err: PixelCloudError) -> Self {
        match err {
            PixelCloudError::IoError(e) => e,
            e => io::Error::new(io::ErrorKind::Other, Box::new(e)),
        }
    }
}

impl PixelCloudError {
    /// If we can't get an element from a loaded data file, gives the i and filename
    pub fn data_access(index: usize, slice_name: String) -> PixelCloudError {
        PixelCloudError::DataAccessError { index, slice_name }
    }
}

/// A parsing error occored while decoding a dataset file
#[derive(Debug)]
pub enum ParsingError {
    /// The fixed size header was missing or carried an impossible value
    MalformedHeaderError {
        /// The file that was messed up
        file_name: String,
        /// The header field that was messed up
        field: &'static str,
    },
    /// The file body didn't hold as many bytes as the header promised
    TruncatedDataError {
        /// The file that the error occored in
        file_name: String,
        /// The byte length the header promised
        expected: usize,
        /// The byte length actually present
        actual: usize,
    },
    /// Something else happened parsing
    RegularParsingError(&'static str),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            &ParsingError::MalformedHeaderError { ref file_name, field } => {
                write!(f, "bad {} in the header of {}", field, file_name)
            }
            &ParsingError::TruncatedDataError {
                ref file_name,
                expected,
                actual,
            } => write!(
                f,
                "{} should hold {} bytes but holds {}",
                file_name, expected, actual
            ),
            &ParsingError::RegularParsingError(..) => write!(f, "Error parsing a dataset"),
        }
    }
}

impl Error for ParsingError {
    fn description(&self) -> &str {
        match self {
            &ParsingError::MalformedHeaderError { .. } => {
                "there is a error reading a dataset header"
            }
            &ParsingError::TruncatedDataError { .. } => "a dataset file was cut short",
            &ParsingError::RegularParsingError(..) => "Error parsing a dataset",
        }
    }

    fn cause(&self) -> Option<&dyn Error> {
        None
    }
}
