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

//! Partitioning of the test range into contiguous, near equal shards.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A contiguous half open range `[start_index, start_index + count)` of the
/// testing dataset, assigned to exactly one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    /// First test index this shard covers
    pub start_index: usize,
    /// Number of test points in this shard
    pub count: usize,
}

impl Shard {
    /// The test indexes this shard covers.
    pub fn range(&self) -> Range<usize> {
        self.start_index..self.start_index + self.count
    }
}

/// Splits `n` test points over `procs` workers. The first `n % procs` shards
/// take `ceil(n / procs)` points, the rest take `floor(n / procs)`, so the
/// counts always sum back to `n` and never differ by more than one. With
/// `procs > n` the trailing shards are empty, and their workers are still
/// spawned so the fan out stays uniform.
pub fn plan(n: usize, procs: usize) -> Vec<Shard> {
    assert!(procs >= 1, "a plan needs at least one worker");
    let base = n / procs;
    let remainder = n % procs;
    let mut shards = Vec::with_capacity(procs);
    let mut start_index = 0;
    for i in 0..procs {
        let count = if i < remainder { base + 1 } else { base };
        shards.push(Shard { start_index, count });
        start_index += count;
    }
    shards
}
