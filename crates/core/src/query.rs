//! The preview query descriptor and its URL serialization.

use std::fmt::{self, Write};

use crate::error::UnknownVariant;
use crate::options::{ImageFormat, Quality, ServiceType, Shape};

/// An immutable descriptor for one preview or thumbnail request.
///
/// All fields are optional; absent fields are simply skipped when the
/// descriptor is serialized. Build one with [`Query::builder`], then share
/// it freely — a `Query` is never mutated after construction and may be
/// reused across any number of concurrent requests.
///
/// The [`Display`](fmt::Display) impl produces the URL path plus query
/// string the preview service expects:
///
/// ```
/// use glimpse_core::{Query, Shape};
///
/// let query = Query::builder()
///     .node_id("n1")
///     .version(2)
///     .preview_area("800x600")
///     .shape(Shape::Rounded)
///     .build();
///
/// assert_eq!(query.to_string(), "/n1/2/800x600/?shape=rounded");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    account_id: Option<String>,
    node_id: Option<String>,
    version: Option<u32>,
    service_type: Option<ServiceType>,
    preview_area: Option<String>,
    shape: Option<Shape>,
    quality: Option<Quality>,
    output_format: Option<ImageFormat>,
    crop: Option<bool>,
    first_page: Option<u32>,
    last_page: Option<u32>,
}

impl Query {
    /// Start building a descriptor.
    #[must_use]
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// Identity value sent as the `AccountId` header on GET requests.
    #[must_use]
    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Identifier of the target document or image.
    #[must_use]
    pub fn node_id(&self) -> Option<&str> {
        self.node_id.as_deref()
    }

    /// Document version.
    #[must_use]
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    /// Which renderer the request targets.
    #[must_use]
    pub fn service_type(&self) -> Option<ServiceType> {
        self.service_type
    }

    /// Requested preview area, e.g. `"800x600"`.
    #[must_use]
    pub fn preview_area(&self) -> Option<&str> {
        self.preview_area.as_deref()
    }

    /// Output shaping.
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// Output quality.
    #[must_use]
    pub fn quality(&self) -> Option<Quality> {
        self.quality
    }

    /// Output encoding.
    #[must_use]
    pub fn output_format(&self) -> Option<ImageFormat> {
        self.output_format
    }

    /// Whether the preview is cropped to the requested area.
    #[must_use]
    pub fn crop(&self) -> Option<bool> {
        self.crop
    }

    /// First page to render for paged documents.
    #[must_use]
    pub fn first_page(&self) -> Option<u32> {
        self.first_page
    }

    /// Last page to render for paged documents.
    #[must_use]
    pub fn last_page(&self) -> Option<u32> {
        self.last_page
    }
}

/// Serializes the descriptor into its URL path and query string.
///
/// Path segments appear in the order node id, version, preview area, each
/// followed by `/` and skipped when absent. Query keys appear in the fixed
/// order `shape`, `quality`, `output_format`, `crop`, `first_page`,
/// `last_page`, `service_type`. An empty descriptor renders as `/` with no
/// trailing `?`.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut base = String::from("/");
        if let Some(node_id) = &self.node_id {
            write!(base, "{node_id}/")?;
        }
        if let Some(version) = self.version {
            write!(base, "{version}/")?;
        }
        if let Some(area) = &self.preview_area {
            write!(base, "{area}/")?;
        }

        let mut params = String::new();
        if let Some(shape) = self.shape {
            write!(params, "shape={shape}&")?;
        }
        if let Some(quality) = self.quality {
            write!(params, "quality={quality}&")?;
        }
        if let Some(format) = self.output_format {
            write!(params, "output_format={format}&")?;
        }
        if let Some(crop) = self.crop {
            write!(params, "crop={crop}&")?;
        }
        if let Some(first_page) = self.first_page {
            write!(params, "first_page={first_page}&")?;
        }
        if let Some(last_page) = self.last_page {
            write!(params, "last_page={last_page}&")?;
        }
        if let Some(service_type) = self.service_type {
            write!(params, "service_type={service_type}")?;
        }
        if params.ends_with('&') {
            params.pop();
        }

        if params.is_empty() {
            f.write_str(&base)
        } else {
            write!(f, "{base}?{params}")
        }
    }
}

/// Builder for a [`Query`].
///
/// Setters consume and return the builder; `build()` cannot fail. The
/// `*_name` setters accept the case-insensitive textual name of an enum
/// value and reject unknown names immediately with [`UnknownVariant`].
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity value sent as the `AccountId` header.
    #[must_use]
    pub fn account_id(mut self, account_id: impl Into<String>) -> Self {
        self.query.account_id = Some(account_id.into());
        self
    }

    /// Set the target node identifier.
    #[must_use]
    pub fn node_id(mut self, node_id: impl Into<String>) -> Self {
        self.query.node_id = Some(node_id.into());
        self
    }

    /// Set the document version.
    #[must_use]
    pub fn version(mut self, version: u32) -> Self {
        self.query.version = Some(version);
        self
    }

    /// Set the target renderer.
    #[must_use]
    pub fn service_type(mut self, service_type: ServiceType) -> Self {
        self.query.service_type = Some(service_type);
        self
    }

    /// Set the target renderer from its textual name.
    pub fn service_type_name(self, name: &str) -> Result<Self, UnknownVariant> {
        Ok(self.service_type(name.parse()?))
    }

    /// Set the preview area, e.g. `"800x600"`.
    #[must_use]
    pub fn preview_area(mut self, preview_area: impl Into<String>) -> Self {
        self.query.preview_area = Some(preview_area.into());
        self
    }

    /// Set the output shaping.
    #[must_use]
    pub fn shape(mut self, shape: Shape) -> Self {
        self.query.shape = Some(shape);
        self
    }

    /// Set the output shaping from its textual name.
    pub fn shape_name(self, name: &str) -> Result<Self, UnknownVariant> {
        Ok(self.shape(name.parse()?))
    }

    /// Set the output quality.
    #[must_use]
    pub fn quality(mut self, quality: Quality) -> Self {
        self.query.quality = Some(quality);
        self
    }

    /// Set the output quality from its textual name.
    pub fn quality_name(self, name: &str) -> Result<Self, UnknownVariant> {
        Ok(self.quality(name.parse()?))
    }

    /// Set the output encoding.
    #[must_use]
    pub fn output_format(mut self, output_format: ImageFormat) -> Self {
        self.query.output_format = Some(output_format);
        self
    }

    /// Set the output encoding from its textual name.
    pub fn output_format_name(self, name: &str) -> Result<Self, UnknownVariant> {
        Ok(self.output_format(name.parse()?))
    }

    /// Set whether the preview is cropped to the requested area.
    #[must_use]
    pub fn crop(mut self, crop: bool) -> Self {
        self.query.crop = Some(crop);
        self
    }

    /// Set the first page to render.
    #[must_use]
    pub fn first_page(mut self, first_page: u32) -> Self {
        self.query.first_page = Some(first_page);
        self
    }

    /// Set the last page to render.
    #[must_use]
    pub fn last_page(mut self, last_page: u32) -> Self {
        self.query.last_page = Some(last_page);
        self
    }

    /// Finalize the descriptor.
    #[must_use]
    pub fn build(self) -> Query {
        self.query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_serializes_to_root() {
        assert_eq!(Query::builder().build().to_string(), "/");
    }

    #[test]
    fn path_segments_in_order() {
        let query = Query::builder()
            .node_id("n1")
            .version(2)
            .preview_area("800x600")
            .build();
        assert_eq!(query.to_string(), "/n1/2/800x600/");
    }

    #[test]
    fn absent_path_segments_are_skipped() {
        let query = Query::builder().node_id("n1").build();
        assert_eq!(query.to_string(), "/n1/");

        let query = Query::builder().preview_area("100x100").build();
        assert_eq!(query.to_string(), "/100x100/");
    }

    #[test]
    fn single_parameter_has_no_trailing_ampersand() {
        let query = Query::builder()
            .node_id("n1")
            .version(2)
            .preview_area("800x600")
            .shape(Shape::Rounded)
            .build();
        assert_eq!(query.to_string(), "/n1/2/800x600/?shape=rounded");
    }

    #[test]
    fn service_type_is_emitted_last() {
        let query = Query::builder()
            .service_type(ServiceType::Image)
            .shape(Shape::Rectangular)
            .build();
        assert_eq!(query.to_string(), "/?shape=rectangular&service_type=image");
    }

    #[test]
    fn all_parameters_in_fixed_order() {
        let query = Query::builder()
            .node_id("abc")
            .version(3)
            .preview_area("640x480")
            .shape(Shape::Rounded)
            .quality(Quality::High)
            .output_format(ImageFormat::Png)
            .crop(true)
            .first_page(1)
            .last_page(4)
            .service_type(ServiceType::Pdf)
            .build();
        assert_eq!(
            query.to_string(),
            "/abc/3/640x480/?shape=rounded&quality=high&output_format=png\
             &crop=true&first_page=1&last_page=4&service_type=pdf"
        );
    }

    #[test]
    fn crop_serializes_as_literal_booleans() {
        let query = Query::builder().crop(false).build();
        assert_eq!(query.to_string(), "/?crop=false");
    }

    #[test]
    fn account_id_never_appears_in_the_serialized_form() {
        let query = Query::builder().account_id("alice").node_id("n1").build();
        assert_eq!(query.to_string(), "/n1/");
        assert_eq!(query.account_id(), Some("alice"));
    }

    #[test]
    fn accessors_reflect_what_was_set() {
        let query = Query::builder()
            .account_id("alice")
            .node_id("n1")
            .version(7)
            .service_type(ServiceType::Document)
            .quality(Quality::Low)
            .first_page(2)
            .build();

        assert_eq!(query.account_id(), Some("alice"));
        assert_eq!(query.node_id(), Some("n1"));
        assert_eq!(query.version(), Some(7));
        assert_eq!(query.service_type(), Some(ServiceType::Document));
        assert_eq!(query.quality(), Some(Quality::Low));
        assert_eq!(query.first_page(), Some(2));
        assert_eq!(query.preview_area(), None);
        assert_eq!(query.shape(), None);
        assert_eq!(query.output_format(), None);
        assert_eq!(query.crop(), None);
        assert_eq!(query.last_page(), None);
    }

    #[test]
    fn name_setters_parse_case_insensitively() {
        let query = Query::builder()
            .shape_name("ROUNDED")
            .unwrap()
            .quality_name("Medium")
            .unwrap()
            .output_format_name("gif")
            .unwrap()
            .service_type_name("IMAGE")
            .unwrap()
            .build();

        assert_eq!(query.shape(), Some(Shape::Rounded));
        assert_eq!(query.quality(), Some(Quality::Medium));
        assert_eq!(query.output_format(), Some(ImageFormat::Gif));
        assert_eq!(query.service_type(), Some(ServiceType::Image));
    }

    #[test]
    fn name_setters_fail_fast_on_unknown_names() {
        let err = Query::builder().shape_name("triangular").unwrap_err();
        assert_eq!(err.field, "shape");
        assert_eq!(err.value, "triangular");

        assert!(Query::builder().service_type_name("video").is_err());
    }

    /// Re-derive the fields from the serialized text and compare, proving
    /// nothing is dropped or reordered within its category.
    #[test]
    fn serialized_form_round_trips() {
        let query = Query::builder()
            .node_id("doc-9")
            .version(12)
            .preview_area("1024x768")
            .shape(Shape::Rectangular)
            .quality(Quality::Highest)
            .output_format(ImageFormat::Webp)
            .crop(false)
            .first_page(3)
            .last_page(9)
            .service_type(ServiceType::Document)
            .build();

        let text = query.to_string();
        let (path, params) = match text.split_once('?') {
            Some((path, params)) => (path, params),
            None => (text.as_str(), ""),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        assert_eq!(segments, ["doc-9", "12", "1024x768"]);

        let pairs: Vec<(&str, &str)> = params
            .split('&')
            .map(|pair| pair.split_once('=').unwrap())
            .collect();
        assert_eq!(
            pairs,
            [
                ("shape", "rectangular"),
                ("quality", "highest"),
                ("output_format", "webp"),
                ("crop", "false"),
                ("first_page", "3"),
                ("last_page", "9"),
                ("service_type", "document"),
            ]
        );

        let rebuilt = Query::builder()
            .node_id(segments[0])
            .version(segments[1].parse().unwrap())
            .preview_area(segments[2])
            .shape_name(pairs[0].1)
            .unwrap()
            .quality_name(pairs[1].1)
            .unwrap()
            .output_format_name(pairs[2].1)
            .unwrap()
            .crop(pairs[3].1.parse().unwrap())
            .first_page(pairs[4].1.parse().unwrap())
            .last_page(pairs[5].1.parse().unwrap())
            .service_type_name(pairs[6].1)
            .unwrap()
            .build();
        assert_eq!(rebuilt, query);
    }
}
