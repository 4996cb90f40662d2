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

//! Whole pipeline checks over in-process clouds: the worker count must never
//! change the answer, and one bad worker must sink the whole run.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pixelcloud::data_sources::PixelRam;
use pixelcloud::label_sources::IntLabels;
use pixelcloud::{Cosine, DefaultLabeledCloud, Metric, SimpleLabeledCloud, L2};

use shardknn::coordinator::Coordinator;

/// Three well separated gaussian-ish blobs, labels 0..3.
fn blob_cloud<M: Metric>(count: usize, dim: usize, seed: u64) -> Arc<DefaultLabeledCloud<M>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(count * dim);
    let mut labels = Vec::with_capacity(count);
    for i in 0..count {
        let label = (i % 3) as i64;
        let center = label as f32 * 10.0;
        for _ in 0..dim {
            data.push(center + rng.gen_range(-1.0..1.0));
        }
        labels.push(label);
    }
    Arc::new(SimpleLabeledCloud::new(
        PixelRam::new(data, dim).unwrap(),
        IntLabels::new(labels),
    ))
}

#[test]
fn worker_count_never_changes_the_answer() {
    let training = blob_cloud::<L2>(60, 4, 13);
    let testing = blob_cloud::<L2>(23, 4, 99);

    let reference = Coordinator::new(
        Arc::clone(&training),
        Arc::clone(&testing),
        3,
        1,
    )
    .run()
    .unwrap();

    for procs in 2..=(2 * 23 + 1) {
        let total = Coordinator::new(
            Arc::clone(&training),
            Arc::clone(&testing),
            3,
            procs,
        )
        .run()
        .unwrap();
        assert_eq!(
            total, reference,
            "P = {} disagreed with the single worker run",
            procs
        );
    }
}

#[test]
fn separable_blobs_score_perfectly() {
    let training = blob_cloud::<L2>(30, 4, 5);
    let testing = blob_cloud::<L2>(12, 4, 6);

    let total = Coordinator::new(training, testing, 1, 4).run().unwrap();
    assert_eq!(total, 12);
}

#[test]
fn cosine_metric_runs_the_same_protocol() {
    let training = blob_cloud::<Cosine>(30, 4, 21);
    let testing = blob_cloud::<Cosine>(10, 4, 22);

    let single = Coordinator::new(
        Arc::clone(&training),
        Arc::clone(&testing),
        3,
        1,
    )
    .run()
    .unwrap();
    let sharded = Coordinator::new(training, testing, 3, 7).run().unwrap();
    assert_eq!(single, sharded);
}

#[test]
fn one_failing_worker_sinks_the_run() {
    let training = blob_cloud::<L2>(30, 4, 31);
    // 9 images but only 5 labels, so the worker holding the tail errors out
    let mut rng = StdRng::seed_from_u64(32);
    let data: Vec<f32> = (0..9 * 4).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let testing = Arc::new(SimpleLabeledCloud::new(
        PixelRam::<L2>::new(data, 4).unwrap(),
        IntLabels::new(vec![0, 0, 0, 0, 0]),
    ));

    for procs in 1..5 {
        let run = Coordinator::new(
            Arc::clone(&training),
            Arc::clone(&testing),
            1,
            procs,
        )
        .run();
        assert!(run.is_err(), "P = {} should have failed", procs);
    }
}
