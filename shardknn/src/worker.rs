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

//! The per shard worker: one descriptor in, one correct count out.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use log::debug;

use pixelcloud::errors::PixelCloudError;
use pixelcloud::LabeledPixelCloud;

use crate::classify::KnnClassifier;
use crate::errors::{ShardKnnError, ShardKnnResult};
use crate::plan::Shard;

/// Scores one shard of the test cloud and reports how many predictions
/// matched the ground truth.
///
/// The protocol is exactly one receive and one send: the worker reads its
/// `Shard` from `shard_rx`, classifies every test index in the range against
/// the shared training cloud, writes the count to `result_tx`, and returns.
/// Losing either channel mid protocol is fatal to this worker and surfaces
/// through its returned status; the clouds are never touched mutably.
pub fn run_worker<D: LabeledPixelCloud>(
    worker: usize,
    training: Arc<D>,
    testing: Arc<D>,
    k: usize,
    shard_rx: Receiver<Shard>,
    result_tx: Sender<u64>,
) -> ShardKnnResult<()> {
    let shard = shard_rx.recv().map_err(|_| ShardKnnError::ChannelError {
        worker,
        message: "the shard descriptor channel closed before delivery",
    })?;
    debug!(
        "worker {} scoring [{}, {})",
        worker,
        shard.start_index,
        shard.start_index + shard.count
    );

    let classifier = KnnClassifier::new(training, k);
    let mut correct: u64 = 0;
    for i in shard.range() {
        let query = testing.image(i)?;
        let truth = testing
            .label(i)?
            .ok_or_else(|| PixelCloudError::data_access(i, "testing labels".to_string()))?;
        if classifier.classify(query)? == truth {
            correct += 1;
        }
    }

    result_tx.send(correct).map_err(|_| ShardKnnError::ChannelError {
        worker,
        message: "the result channel closed before delivery",
    })?;
    debug!("worker {} reported {} correct", worker, correct);
    Ok(())
}
