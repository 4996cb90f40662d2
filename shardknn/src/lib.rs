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

#![allow(dead_code)]
#![warn(missing_docs)]

//! # Shardknn
//! Scores a labeled test set against a training set with a brute force kNN
//! vote, split across worker threads.
//!
//! The test range is cut into contiguous, near equal shards, one per worker.
//! Each worker owns a dedicated pair of channels: it reads exactly one shard
//! descriptor, classifies every test point in its range against the full
//! training cloud, and reports a single count of correct predictions. The
//! coordinator folds the counts, in spawn order, into one total. The clouds
//! themselves are shared read-only behind `Arc`s, so a worker never copies
//! or mutates the data it scores against.

pub mod errors;
pub use errors::ShardKnnResult;

pub mod classify;
pub mod config;
pub mod coordinator;
pub mod plan;
pub mod worker;

mod query_heap;
pub use query_heap::KnnHeap;
