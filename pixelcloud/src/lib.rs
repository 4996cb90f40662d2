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
//! # Pixel Cloud
//! Abstracts access to labeled vector data: dense feature rows glued to integer labels.

#![allow(dead_code)]
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

mod distances;
pub use distances::*;
pub mod errors;

pub mod data_sources;
pub mod label_sources;
pub mod summaries;

pub mod loaders;

mod base_traits;
#[doc(inline)]
pub use base_traits::*;

use data_sources::PixelRam;
use label_sources::IntLabels;

/// A sensible default for a labeled cloud
pub type DefaultLabeledCloud<M> = SimpleLabeledCloud<PixelRam<M>, IntLabels>;
/// A sensible default for an unlabeled cloud
pub type DefaultCloud<M> = PixelRam<M>;

/// To make things more obvious, we type the image index.
/// This is abstracted over the file that was used to build the cloud
pub type ImageIndex = usize;
