//! Label sources for glueing to data sources.

use crate::base_traits::*;
use crate::errors::*;
use crate::summaries::TallyCounter;
use crate::ImageIndex;

/// The ground truth column: one integer label per image, addressed by index.
#[derive(Debug)]
pub struct IntLabels {
    labels: Vec<i64>,
}

impl IntLabels {
    /// Creates a new one from the decoded label column.
    pub fn new(labels: Vec<i64>) -> IntLabels {
        IntLabels { labels }
    }
}

impl LabelSet for IntLabels {
    fn len(&self) -> usize {
        self.labels.len()
    }
    fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
    fn label(&self, i: ImageIndex) -> PixelCloudResult<Option<i64>> {
        Ok(self.labels.get(i).copied())
    }
    fn label_tally(&self, indexes: &[ImageIndex]) -> PixelCloudResult<TallyCounter> {
        let mut counter = TallyCounter::default();
        for i in indexes {
            counter.add(Ok(self.labels.get(*i).copied()));
        }
        Ok(counter)
    }
}
