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

//! Brute force kNN scoring against a shared training cloud.

use std::sync::Arc;

use pixelcloud::{ImageIndex, LabeledPixelCloud};

use crate::errors::{ShardKnnError, ShardKnnResult};
use crate::query_heap::KnnHeap;

/// Predicts labels by majority vote among the K nearest training images.
/// The metric comes from the cloud's type parameter, so a classifier is
/// monomorphized per metric rather than dispatched per query.
#[derive(Debug)]
pub struct KnnClassifier<D> {
    training: Arc<D>,
    indexes: Vec<ImageIndex>,
    k: usize,
}

impl<D: LabeledPixelCloud> KnnClassifier<D> {
    /// Creates a new one over a shared training cloud.
    pub fn new(training: Arc<D>, k: usize) -> KnnClassifier<D> {
        let indexes = (0..training.len()).collect();
        KnnClassifier {
            training,
            indexes,
            k,
        }
    }

    /// The predicted label for one query row: the majority label among the
    /// K training images closest to it, ties going to the smaller label.
    pub fn classify(&self, query: &[f32]) -> ShardKnnResult<i64> {
        let dists = self.training.distances_to_image(query, &self.indexes)?;
        let mut heap = KnnHeap::new(self.k);
        for (i, d) in self.indexes.iter().zip(dists) {
            heap.push(*i, d);
        }
        let neighbors: Vec<ImageIndex> = heap.unpack().iter().map(|(_d, i)| *i).collect();
        let vote = self.training.label_tally(&neighbors)?;
        vote.tally().dominant().ok_or(ShardKnnError::EmptyTrainingSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelcloud::data_sources::PixelRam;
    use pixelcloud::label_sources::IntLabels;
    use pixelcloud::{DefaultLabeledCloud, SimpleLabeledCloud, L2};

    fn labeled_cloud(rows: &[(&[f32], i64)]) -> DefaultLabeledCloud<L2> {
        let dim = rows[0].0.len();
        let data: Vec<f32> = rows.iter().flat_map(|(row, _)| row.iter().cloned()).collect();
        let labels: Vec<i64> = rows.iter().map(|(_, label)| *label).collect();
        SimpleLabeledCloud::new(PixelRam::new(data, dim).unwrap(), IntLabels::new(labels))
    }

    #[test]
    fn one_nearest_neighbor_predicts_the_closest_label() {
        let training = labeled_cloud(&[
            (&[0.0, 0.0], 0),
            (&[1.0, 0.0], 1),
            (&[0.0, 1.0], 2),
        ]);
        let classifier = KnnClassifier::new(Arc::new(training), 1);

        assert_eq!(classifier.classify(&[0.1, 0.1]).unwrap(), 0);
        assert_eq!(classifier.classify(&[0.9, 0.1]).unwrap(), 1);
        assert_eq!(classifier.classify(&[0.1, 0.9]).unwrap(), 2);
    }

    #[test]
    fn three_nearest_outvote_the_single_closest() {
        // The closest image says 7, but its two slightly further neighbors say 2.
        let training = labeled_cloud(&[
            (&[0.0], 7),
            (&[0.2], 2),
            (&[-0.2], 2),
            (&[5.0], 9),
        ]);
        let classifier = KnnClassifier::new(Arc::new(training), 3);

        assert_eq!(classifier.classify(&[0.01]).unwrap(), 2);
    }

    #[test]
    fn vote_tie_resolves_to_the_smaller_label() {
        let training = labeled_cloud(&[(&[-1.0], 8), (&[1.0], 3)]);
        let classifier = KnnClassifier::new(Arc::new(training), 2);

        assert_eq!(classifier.classify(&[0.0]).unwrap(), 3);
    }

    #[test]
    fn oversized_k_still_votes_over_what_exists() {
        let training = labeled_cloud(&[(&[0.0], 4), (&[1.0], 4)]);
        let classifier = KnnClassifier::new(Arc::new(training), 10);

        assert_eq!(classifier.classify(&[0.4]).unwrap(), 4);
    }

    #[test]
    fn empty_training_set_is_an_error() {
        let training: DefaultLabeledCloud<L2> = SimpleLabeledCloud::new(
            PixelRam::new(Vec::new(), 2).unwrap(),
            IntLabels::new(Vec::new()),
        );
        let classifier = KnnClassifier::new(Arc::new(training), 1);

        match classifier.classify(&[0.0, 0.0]) {
            Err(ShardKnnError::EmptyTrainingSet) => {}
            other => panic!("expected an empty training error, got {:?}", other),
        }
    }
}
