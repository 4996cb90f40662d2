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

//! Spawns one worker per planned shard, hands each its descriptor, and folds
//! their reported counts into the final total.

use std::sync::Arc;
use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver};
use log::{debug, info};

use pixelcloud::LabeledPixelCloud;

use crate::errors::{ShardKnnError, ShardKnnResult};
use crate::plan::plan;
use crate::worker::run_worker;

/// The coordinator's view of one spawned worker: the receiving half of its
/// dedicated result channel, and the join handle carrying its termination
/// status.
struct WorkerHandle {
    worker: usize,
    result_rx: Receiver<u64>,
    join: JoinHandle<ShardKnnResult<()>>,
}

/// Runs the whole scoring protocol over shared, immutable clouds.
///
/// The coordinator itself is single threaded: it spawns, delivers, collects,
/// and reaps strictly sequentially, and it is the only owner of the running
/// total. Workers run in parallel with each other and with the tail of the
/// spawn loop; each one talks to the coordinator only over its own channel
/// pair, so no worker can block another's handoff.
#[derive(Debug)]
pub struct Coordinator<D> {
    training: Arc<D>,
    testing: Arc<D>,
    k: usize,
    procs: usize,
}

impl<D: LabeledPixelCloud> Coordinator<D> {
    /// Creates a new one. `procs` is the worker count and must be at least 1.
    pub fn new(training: Arc<D>, testing: Arc<D>, k: usize, procs: usize) -> Coordinator<D> {
        Coordinator {
            training,
            testing,
            k,
            procs,
        }
    }

    /// Plans the shards, runs one worker per shard, and returns the total
    /// number of correct predictions across the whole test cloud.
    ///
    /// Results are collected in spawn order, not readiness order. That is
    /// safe because every worker reports on its own dedicated channel, and a
    /// worker that dies before reporting closes that channel, so the blocked
    /// read turns into a disconnect instead of a hang. Termination statuses
    /// are inspected after collection; any failed worker fails the run even
    /// though a numeric total may already exist.
    pub fn run(&self) -> ShardKnnResult<u64> {
        let shards = plan(self.testing.len(), self.procs);
        info!(
            "scoring {} test points against {} training points on {} workers",
            self.testing.len(),
            self.training.len(),
            shards.len()
        );

        debug!("creating workers");
        let mut workers: Vec<WorkerHandle> = Vec::with_capacity(shards.len());
        for (worker, shard) in shards.into_iter().enumerate() {
            let (shard_tx, shard_rx) = bounded(1);
            let (result_tx, result_rx) = bounded(1);
            let training = Arc::clone(&self.training);
            let testing = Arc::clone(&self.testing);
            let k = self.k;
            let join = thread::Builder::new()
                .name(format!("shard-worker-{}", worker))
                .spawn(move || run_worker(worker, training, testing, k, shard_rx, result_tx))
                .map_err(|e| ShardKnnError::ResourceError {
                    worker,
                    message: e.to_string(),
                })?;
            shard_tx.send(shard).map_err(|_| ShardKnnError::ChannelError {
                worker,
                message: "the worker hung up before its shard was delivered",
            })?;
            // Closing our write end lets the worker see a finished handoff
            drop(shard_tx);
            workers.push(WorkerHandle {
                worker,
                result_rx,
                join,
            });
        }

        let mut total_correct: u64 = 0;
        let mut unreported: Option<usize> = None;
        for handle in &workers {
            match handle.result_rx.recv() {
                Ok(count) => {
                    debug!("worker {} returned {} correct", handle.worker, count);
                    total_correct += count;
                }
                Err(_) => {
                    // The worker owns the only sender, so a disconnect means
                    // it died before reporting. Its status below says why.
                    if unreported.is_none() {
                        unreported = Some(handle.worker);
                    }
                }
            }
        }

        debug!("waiting for workers");
        let mut failure: Option<ShardKnnError> = None;
        for handle in workers {
            let worker = handle.worker;
            match handle.join.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if failure.is_none() {
                        failure = Some(ShardKnnError::WorkerFailure {
                            worker,
                            message: e.to_string(),
                        });
                    }
                }
                Err(_) => {
                    if failure.is_none() {
                        failure = Some(ShardKnnError::WorkerFailure {
                            worker,
                            message: "the worker panicked".to_string(),
                        });
                    }
                }
            }
        }
        if let Some(failure) = failure {
            return Err(failure);
        }
        if let Some(worker) = unreported {
            // A clean exit without a report still breaks the protocol
            return Err(ShardKnnError::ChannelError {
                worker,
                message: "the worker terminated without reporting a result",
            });
        }

        info!("number of correct predictions: {}", total_correct);
        Ok(total_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelcloud::data_sources::PixelRam;
    use pixelcloud::label_sources::IntLabels;
    use pixelcloud::{DefaultLabeledCloud, SimpleLabeledCloud, L2};

    fn cloud_1d(points: &[f32], labels: &[i64]) -> Arc<DefaultLabeledCloud<L2>> {
        Arc::new(SimpleLabeledCloud::new(
            PixelRam::new(points.to_vec(), 1).unwrap(),
            IntLabels::new(labels.to_vec()),
        ))
    }

    #[test]
    fn four_of_five_scenario() {
        let training = cloud_1d(&[0.0, 1.0, 2.0, 3.0], &[0, 1, 2, 3]);
        // The fifth ground truth is planted wrong, so exactly 4 of 5 match
        let testing = cloud_1d(&[0.1, 1.1, 2.1, 3.1, 0.9], &[0, 1, 2, 3, 5]);

        let coordinator = Coordinator::new(training, testing, 1, 2);
        assert_eq!(coordinator.run().unwrap(), 4);
    }

    #[test]
    fn empty_test_cloud_scores_zero() {
        let training = cloud_1d(&[0.0, 1.0], &[0, 1]);
        let testing = cloud_1d(&[], &[]);

        let coordinator = Coordinator::new(training, testing, 1, 4);
        assert_eq!(coordinator.run().unwrap(), 0);
    }

    #[test]
    fn worker_failure_fails_the_run() {
        let training = cloud_1d(&[0.0, 1.0], &[0, 1]);
        // Labels stop short of the data, so the last shard's worker errors out
        let testing = Arc::new(SimpleLabeledCloud::new(
            PixelRam::<L2>::new(vec![0.0, 0.1, 0.2, 0.9, 1.0], 1).unwrap(),
            IntLabels::new(vec![0, 0, 0]),
        ));

        let coordinator = Coordinator::new(training, testing, 1, 2);
        match coordinator.run() {
            Err(ShardKnnError::WorkerFailure { worker: 1, .. }) => {}
            other => panic!("expected worker 1 to fail the run, got {:?}", other),
        }
    }
}
