use std::collections::BTreeMap;
use std::fmt::Display;

use clap::builder::PossibleValue;
use clap::ValueEnum;
use threadpool::ThreadPool;

use crate::image::{ImageStore, PixelGrid};
use crate::Result;

pub mod dithering;
pub mod luma;

use dithering::Dithering;
use luma::LumaComponent;

/// Turns one image into a new image of the same dimensions.
pub trait Transformation {
    fn name(&self) -> &'static str;

    fn transform(
        &self,
        input: &PixelGrid,
        parameters: &TransformationParameters,
    ) -> Result<PixelGrid>;
}

/// Free form `key=value` options handed to every transformation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformationParameters {
    values: BTreeMap<String, String>,
}

impl TransformationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn warn_unrecognized(&self, transformation_name: &str) {
        for (key, value) in &self.values {
            log::warn!(
                "Ignoring parameter '{}={}', {} does not recognize it",
                key,
                value,
                transformation_name
            );
        }
    }
}

impl FromIterator<(String, String)> for TransformationParameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformationKind {
    Dither,
    Luma,
}

impl ValueEnum for TransformationKind {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Dither, Self::Luma]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        match self {
            Self::Dither => Some(PossibleValue::new("dither")),
            Self::Luma => Some(PossibleValue::new("luma")),
        }
    }
}

impl Display for TransformationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dither => write!(f, "dither"),
            Self::Luma => write!(f, "luma"),
        }
    }
}

/// Runs transformations on the images of a store and keeps the results in it.
pub struct ImageTransformer<'a> {
    store: ImageStore,
    threadpool: &'a ThreadPool,
}

impl<'a> ImageTransformer<'a> {
    pub fn new(store: ImageStore, threadpool: &'a ThreadPool) -> Self {
        Self { store, threadpool }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn into_store(self) -> ImageStore {
        self.store
    }

    fn create_transformation(&self, kind: TransformationKind) -> Box<dyn Transformation + 'a> {
        match kind {
            TransformationKind::Dither => Box::new(Dithering),
            TransformationKind::Luma => Box::new(LumaComponent::new(self.threadpool)),
        }
    }

    pub fn apply(
        &mut self,
        kind: TransformationKind,
        input_name: &str,
        output_name: &str,
        parameters: &TransformationParameters,
    ) -> Result<&PixelGrid> {
        let input = self.store.get(input_name)?;
        let transformation = self.create_transformation(kind);
        log::info!(
            "Applying {} to '{}' ({}x{}) as '{}'",
            transformation.name(),
            input_name,
            input.cols(),
            input.rows(),
            output_name
        );
        let output = transformation.transform(input, parameters)?;
        self.store.insert(output_name, output);
        self.store.get(output_name)
    }

    /// Applies `kinds` in order and returns the name of the last image produced.
    /// Intermediate results stay in the store as `<input>-<kind>[-<kind>...]`.
    pub fn apply_pipeline(
        &mut self,
        input_name: &str,
        kinds: &[TransformationKind],
        parameters: &TransformationParameters,
    ) -> Result<String> {
        let mut current_name = input_name.to_owned();
        self.store.get(&current_name)?;
        for &kind in kinds {
            let output_name = format!("{}-{}", current_name, kind);
            self.apply(kind, &current_name, &output_name, parameters)?;
            current_name = output_name;
        }
        Ok(current_name)
    }
}

#[cfg(test)]
mod test {
    use threadpool::ThreadPool;

    use crate::color::Pixel;
    use crate::error::Error;
    use crate::image::{ImageStore, PixelGrid};

    use super::{ImageTransformer, TransformationKind, TransformationParameters};

    fn create_store() -> ImageStore {
        let mut store = ImageStore::new();
        let grid = PixelGrid::from_rows(vec![
            vec![Pixel::new(200, 150, 50), Pixel::grey(255)],
            vec![Pixel::grey(10), Pixel::new(90, 255, 30)],
        ])
        .unwrap();
        store.insert("photo", grid);
        store
    }

    #[test]
    fn apply_stores_result_under_output_name() {
        let threadpool = ThreadPool::new(2);
        let mut transformer = ImageTransformer::new(create_store(), &threadpool);
        let output = transformer
            .apply(
                TransformationKind::Luma,
                "photo",
                "photo-luma",
                &TransformationParameters::new(),
            )
            .unwrap();
        assert_eq!(output.pixel(0, 0), Pixel::new(42, 107, 3));
        assert!(transformer.store().contains("photo"));
        assert!(transformer.store().contains("photo-luma"));
    }

    #[test]
    fn apply_to_unknown_image_fails() {
        let threadpool = ThreadPool::new(1);
        let mut transformer = ImageTransformer::new(create_store(), &threadpool);
        let result = transformer.apply(
            TransformationKind::Dither,
            "missing",
            "missing-dither",
            &TransformationParameters::new(),
        );
        match result {
            Err(Error::MissingInputImage(name)) => assert_eq!(name, "missing"),
            _ => panic!("Missing input image was not reported"),
        }
        assert!(!transformer.store().contains("missing-dither"));
    }

    #[test]
    fn pipeline_names_intermediate_images() {
        let threadpool = ThreadPool::new(2);
        let mut transformer = ImageTransformer::new(create_store(), &threadpool);
        let mut parameters = TransformationParameters::new();
        parameters.insert("unused", "value");
        let final_name = transformer
            .apply_pipeline(
                "photo",
                &[TransformationKind::Luma, TransformationKind::Dither],
                &parameters,
            )
            .unwrap();
        assert_eq!(final_name, "photo-luma-dither");
        let store = transformer.into_store();
        assert_eq!(store.len(), 3);
        assert!(store.contains("photo-luma"));
        let result = store.get(&final_name).unwrap();
        assert!(result.pixels().iter().all(Pixel::is_black_or_white));
    }

    #[test]
    fn empty_pipeline_returns_input_name() {
        let threadpool = ThreadPool::new(1);
        let mut transformer = ImageTransformer::new(create_store(), &threadpool);
        let final_name = transformer
            .apply_pipeline("photo", &[], &TransformationParameters::new())
            .unwrap();
        assert_eq!(final_name, "photo");
        assert!(transformer
            .apply_pipeline("absent", &[], &TransformationParameters::new())
            .is_err());
    }

    #[test]
    fn parameters_collect_from_pairs() {
        let parameters: TransformationParameters = vec![
            ("threshold".to_owned(), "100".to_owned()),
            ("mode".to_owned(), "fast".to_owned()),
        ]
        .into_iter()
        .collect();
        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters.get("mode"), Some("fast"));
        assert_eq!(parameters.get("missing"), None);
    }
}
