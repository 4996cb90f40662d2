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

//! Ram allocated data.

use std::marker::PhantomData;

use crate::distances::*;
use crate::errors::{PixelCloudError, PixelCloudResult};

use crate::base_traits::*;
use crate::ImageIndex;

/// Feature rows stored contiguously in ram, row major with a fixed dimension.
#[derive(Debug)]
pub struct PixelRam<M = L2> {
    name: String,
    data: Vec<f32>,
    dim: usize,
    metric: PhantomData<M>,
}

impl<M> PixelRam<M> {
    /// Consumes your buffer and dimension and gives a dimensioned buffer.
    pub fn new(data: Vec<f32>, dim: usize) -> PixelCloudResult<PixelRam<M>> {
        assert!(dim > 0);
        assert!(data.len() % dim == 0);
        Ok(PixelRam {
            name: "RAM".to_string(),
            data,
            dim,
            metric: PhantomData,
        })
    }

    /// Same, but keeps the name of the file this buffer was decoded from for diagnostics.
    pub fn new_named(name: String, data: Vec<f32>, dim: usize) -> PixelCloudResult<PixelRam<M>> {
        let mut ram = PixelRam::new(data, dim)?;
        ram.name = name;
        Ok(ram)
    }
}

impl<M: Metric> PixelCloud for PixelRam<M> {
    type Metric = M;

    #[inline]
    fn dim(&self) -> usize {
        self.dim
    }
    #[inline]
    fn len(&self) -> usize {
        self.data.len() / self.dim
    }
    #[inline]
    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    #[inline]
    fn image(&self, i: ImageIndex) -> PixelCloudResult<&[f32]> {
        match self.data.get(self.dim * i..self.dim * (i + 1)) {
            None => Err(PixelCloudError::data_access(i, self.name.clone())),
            Some(row) => Ok(row),
        }
    }
}
