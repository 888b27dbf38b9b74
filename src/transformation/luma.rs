use std::sync::mpsc::channel;

use threadpool::ThreadPool;

use super::{Transformation, TransformationParameters};
use crate::color::Pixel;
use crate::error::Error;
use crate::image::PixelGrid;
use crate::Result;

/// Replaces every pixel by its luma weighted channels. Rows are independent of
/// each other and are mapped on the thread pool.
pub struct LumaComponent<'a> {
    threadpool: &'a ThreadPool,
}

impl<'a> LumaComponent<'a> {
    pub fn new(threadpool: &'a ThreadPool) -> Self {
        Self { threadpool }
    }

    fn map_rows_in_parallel(&self, input: &PixelGrid) -> Result<Vec<Vec<Pixel>>> {
        let (sender, receiver) = channel();
        for (row_index, row) in input.rows_iter().enumerate() {
            let sender = sender.clone();
            let row = row.to_vec();
            self.threadpool.execute(move || {
                // the receiver outlives every job
                let _ = sender.send((row_index, map_row(&row)));
            });
        }
        drop(sender);

        let mut rows: Vec<Option<Vec<Pixel>>> = vec![None; input.rows()];
        for (row_index, row) in receiver {
            rows[row_index] = Some(row);
        }
        rows.into_iter()
            .enumerate()
            .map(|(row_index, row)| row.ok_or(Error::TransformationWorkerFailed(row_index)))
            .collect()
    }
}

fn map_row(row: &[Pixel]) -> Vec<Pixel> {
    row.iter().map(Pixel::luma_component).collect()
}

impl Transformation for LumaComponent<'_> {
    fn name(&self) -> &'static str {
        "luma component"
    }

    fn transform(
        &self,
        input: &PixelGrid,
        parameters: &TransformationParameters,
    ) -> Result<PixelGrid> {
        parameters.warn_unrecognized(self.name());
        log::debug!(
            "Extracting luma of {}x{} image on {} threads",
            input.cols(),
            input.rows(),
            self.threadpool.max_count()
        );
        let rows = self.map_rows_in_parallel(input)?;
        PixelGrid::from_rows(rows)
    }
}
