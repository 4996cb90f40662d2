use std::sync::Mutex;

use rayon::prelude::*;
use std::cmp::min;
use std::fmt::Debug;

use crate::distances::*;
use crate::errors::*;
use crate::summaries::TallyCounter;
use crate::ImageIndex;

// This could possibly be improved to be architecture specific. It depends on the CPU cache size
#[inline]
fn chunk(data_dim: usize) -> usize {
    min(15000 / data_dim, 20)
}

/// Base trait for a cloud of dense feature rows.
pub trait PixelCloud: Debug + Send + Sync + 'static {
    /// Underlying metric this cloud measures with
    type Metric: Metric;

    /// The number of images this cloud covers
    fn len(&self) -> usize;
    /// If this is empty
    fn is_empty(&self) -> bool;
    /// The dimension of the underlying data
    fn dim(&self) -> usize;
    /// The feature row of one image
    fn image(&self, i: ImageIndex) -> PixelCloudResult<&[f32]>;

    /// Distances from one query row to a set of images. Long index lists are
    /// chunked over the rayon pool, short ones stay on the calling thread.
    fn distances_to_image(
        &self,
        query: &[f32],
        indexes: &[ImageIndex],
    ) -> PixelCloudResult<Vec<f32>> {
        let chunk = chunk(self.dim());
        if indexes.len() > chunk * 3 {
            let mut dists: Vec<f32> = vec![0.0; indexes.len()];
            let error: Mutex<Result<(), PixelCloudError>> = Mutex::new(Ok(()));
            dists
                .par_chunks_mut(chunk)
                .zip(indexes.par_chunks(chunk))
                .for_each(|(chunk_dists, chunk_indexes)| {
                    for (d, i) in chunk_dists.iter_mut().zip(chunk_indexes) {
                        match self.image(*i) {
                            Ok(y) => *d = (Self::Metric::dist)(query, y),
                            Err(e) => {
                                *error.lock().unwrap() = Err(e);
                            }
                        }
                    }
                });
            (error.into_inner().unwrap())?;
            Ok(dists)
        } else {
            indexes
                .iter()
                .map(|i| {
                    let y = self.image(*i)?;
                    Ok((Self::Metric::dist)(query, y))
                })
                .collect()
        }
    }
}

/// A container that just holds the ground truth column. Meant to be glued to
/// a data source by `SimpleLabeledCloud`.
pub trait LabelSet: Debug + Send + Sync + 'static {
    /// Number of labels in this set
    fn len(&self) -> usize;
    /// If there are no labels left in this set
    fn is_empty(&self) -> bool;
    /// The label of one image. `None` where the column runs short of the data.
    fn label(&self, i: ImageIndex) -> PixelCloudResult<Option<i64>>;
    /// Tallies the labels of a set of images.
    fn label_tally(&self, indexes: &[ImageIndex]) -> PixelCloudResult<TallyCounter>;
}

/// A pixel cloud that knows its ground truth.
pub trait LabeledPixelCloud: PixelCloud {
    /// The label of one image. `None` where the column runs short of the data.
    fn label(&self, i: ImageIndex) -> PixelCloudResult<Option<i64>>;
    /// Tallies the labels of a set of images.
    fn label_tally(&self, indexes: &[ImageIndex]) -> PixelCloudResult<TallyCounter>;
}

/// Simply shoves together a pixel cloud and a label set, for a modular label system
#[derive(Debug)]
pub struct SimpleLabeledCloud<D, L> {
    data: D,
    labels: L,
}

impl<D: PixelCloud, L: LabelSet> SimpleLabeledCloud<D, L> {
    /// Creates a new one
    pub fn new(data: D, labels: L) -> Self {
        SimpleLabeledCloud { data, labels }
    }
}

impl<D: PixelCloud, L: LabelSet> PixelCloud for SimpleLabeledCloud<D, L> {
    type Metric = D::Metric;

    #[inline]
    fn dim(&self) -> usize {
        self.data.dim()
    }
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }
    #[inline]
    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    #[inline]
    fn image(&self, i: ImageIndex) -> PixelCloudResult<&[f32]> {
        self.data.image(i)
    }
}

impl<D: PixelCloud, L: LabelSet> LabeledPixelCloud for SimpleLabeledCloud<D, L> {
    fn label(&self, i: ImageIndex) -> PixelCloudResult<Option<i64>> {
        self.labels.label(i)
    }
    fn label_tally(&self, indexes: &[ImageIndex]) -> PixelCloudResult<TallyCounter> {
        self.labels.label_tally(indexes)
    }
}
