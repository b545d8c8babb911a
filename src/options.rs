//! Request options rendered into cdnjs query strings.
//!
//! [`RequestOptions`] selects which attributes the server returns and whether
//! it pretty-prints its JSON. [`SearchRequestOptions`] adds a search term for
//! the library listing endpoint. Both render through [`QueryString`].

use std::fmt;

use once_cell::sync::Lazy;

use crate::error::{CdnJsError, Result};
use crate::fields::{field_names, FieldSet};

/// Attributes requested by [`RequestOptions::minimal`].
pub const MINIMAL_FIELDS: [&str; 3] = ["name", "version", "versions"];

static UNSPECIFIED: Lazy<RequestOptions> = Lazy::new(|| RequestOptions::frozen(FieldSet::new()));

static MINIMAL: Lazy<RequestOptions> =
    Lazy::new(|| RequestOptions::frozen(MINIMAL_FIELDS.into_iter().collect()));

static ALL: Lazy<RequestOptions> =
    Lazy::new(|| RequestOptions::frozen(field_names().wire_names().into_iter().collect()));

/// Anything that renders into a URL query string.
pub trait QueryString {
    /// Render the query string.
    ///
    /// Returns an empty string when there are no parameters, otherwise the
    /// parameters prefixed with `?` and separated by `&`.
    fn to_query_string(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Mutable,
    Frozen,
}

/// Field selection and output mode for a cdnjs request.
///
/// # Example
///
/// ```
/// use cdnjs::{QueryString, RequestOptions};
///
/// let mut options = RequestOptions::new();
/// options.add_field("name")?;
/// options.add_field("latest_main_file_url")?;
/// options.set_human_readable(true)?;
///
/// assert_eq!(options.to_query_string(), "?fields=name,latest&output=human");
/// # Ok::<(), cdnjs::CdnJsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    fields: FieldSet,
    human_readable: bool,
    mode: Mode,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestOptions {
    /// Create mutable options with no fields selected.
    pub fn new() -> Self {
        Self {
            fields: FieldSet::new(),
            human_readable: false,
            mode: Mode::Mutable,
        }
    }

    fn frozen(fields: FieldSet) -> Self {
        Self {
            fields,
            human_readable: false,
            mode: Mode::Frozen,
        }
    }

    /// Preset requesting no particular fields; the server picks its default set.
    pub fn unspecified() -> Self {
        UNSPECIFIED.clone()
    }

    /// Preset requesting `name`, `version` and `versions`.
    pub fn minimal() -> Self {
        MINIMAL.clone()
    }

    /// Preset requesting every known attribute.
    pub fn all() -> Self {
        ALL.clone()
    }

    /// Returns true if this is a preset that rejects modification.
    pub fn is_frozen(&self) -> bool {
        self.mode == Mode::Frozen
    }

    /// Return an editable copy with the same fields and output mode.
    pub fn to_mutable(&self) -> Self {
        Self {
            mode: Mode::Mutable,
            ..self.clone()
        }
    }

    /// The requested fields.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Whether the server is asked for human-readable output.
    pub fn human_readable(&self) -> bool {
        self.human_readable
    }

    fn ensure_mutable(&self) -> Result<()> {
        match self.mode {
            Mode::Mutable => Ok(()),
            Mode::Frozen => Err(CdnJsError::InvalidOperation(
                "preset request options cannot be modified".to_string(),
            )),
        }
    }

    /// Request a field. Returns false if it was already requested.
    ///
    /// Names may be canonical attribute names or wire names; unknown names are
    /// sent as-is.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset, or
    /// [`CdnJsError::InvalidArgument`] if `name` contains `#`.
    pub fn add_field(&mut self, name: impl Into<String>) -> Result<bool> {
        self.ensure_mutable()?;
        let name = name.into();
        check_field_name(&name)?;
        Ok(self.fields.insert(name))
    }

    /// Stop requesting a field. Returns true if it was requested.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset.
    pub fn remove_field(&mut self, name: &str) -> Result<bool> {
        self.ensure_mutable()?;
        Ok(self.fields.remove(name))
    }

    /// Replace the requested fields.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset, or
    /// [`CdnJsError::InvalidArgument`] if any name contains `#`. The current
    /// fields are left unchanged on error.
    pub fn set_fields<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_mutable()?;
        let mut fields = FieldSet::new();
        for name in names {
            let name = name.into();
            check_field_name(&name)?;
            fields.insert(name);
        }
        self.fields = fields;
        Ok(())
    }

    /// Remove all requested fields.
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset.
    pub fn clear_fields(&mut self) -> Result<()> {
        self.ensure_mutable()?;
        self.fields.clear();
        Ok(())
    }

    /// Ask the server for pretty-printed output (`output=human`).
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset.
    pub fn set_human_readable(&mut self, human_readable: bool) -> Result<()> {
        self.ensure_mutable()?;
        self.human_readable = human_readable;
        Ok(())
    }

    /// Builder-style [`add_field`](Self::add_field).
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset.
    pub fn with_field(mut self, name: impl Into<String>) -> Result<Self> {
        self.add_field(name)?;
        Ok(self)
    }

    /// Builder-style [`set_human_readable`](Self::set_human_readable).
    ///
    /// # Errors
    ///
    /// Returns [`CdnJsError::InvalidOperation`] on a preset.
    pub fn with_human_readable(mut self, human_readable: bool) -> Result<Self> {
        self.set_human_readable(human_readable)?;
        Ok(self)
    }
}

// Field names are rendered unescaped, and a `#` would start the URL fragment.
fn check_field_name(name: &str) -> Result<()> {
    if name.contains('#') {
        return Err(CdnJsError::InvalidArgument { name: "field" });
    }
    Ok(())
}

impl QueryString for RequestOptions {
    fn to_query_string(&self) -> String {
        let mut params: Vec<String> = Vec::with_capacity(2);

        if !self.fields.is_empty() {
            let registry = field_names();
            let fields: Vec<&str> = self.fields.iter().map(|f| registry.resolve(f)).collect();
            params.push(format!("fields={}", fields.join(",")));
        }

        if self.human_readable {
            params.push("output=human".to_string());
        }

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

impl fmt::Display for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Request options for searching the library catalog.
///
/// # Example
///
/// ```
/// use cdnjs::{QueryString, SearchRequestOptions};
///
/// let options = SearchRequestOptions::new("date picker");
/// assert_eq!(options.to_query_string(), "?search=date%20picker");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequestOptions {
    options: RequestOptions,
    search: Option<String>,
}

impl SearchRequestOptions {
    /// Create search options with no fields selected.
    pub fn new(search: impl Into<String>) -> Self {
        Self::with_options(search, RequestOptions::new())
    }

    /// Create search options on top of existing request options.
    pub fn with_options(search: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            options,
            search: Some(search.into()),
        }
    }

    /// The search term, if set.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Set or clear the search term. A cleared term omits the parameter.
    pub fn set_search(&mut self, search: Option<String>) {
        self.search = search;
    }

    /// The underlying field and output options.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Mutable access to the underlying field and output options.
    pub fn options_mut(&mut self) -> &mut RequestOptions {
        &mut self.options
    }
}

impl QueryString for SearchRequestOptions {
    fn to_query_string(&self) -> String {
        let mut query = self.options.to_query_string();

        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(if query.is_empty() { '?' } else { '&' });
            query.push_str("search=");
            query.push_str(&urlencoding::encode(search));
        }

        query
    }
}

impl fmt::Display for SearchRequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_options_render_empty() {
        let options = RequestOptions::new();
        assert!(options.fields().is_empty());
        assert!(!options.human_readable());
        assert!(!options.is_frozen());
        assert_eq!(options.to_query_string(), "");
    }

    #[test]
    fn test_known_field_renders_wire_name() {
        let options = RequestOptions::new()
            .with_field("homepage_url")
            .unwrap();
        assert_eq!(options.to_query_string(), "?fields=homepage");
    }

    #[test]
    fn test_unknown_field_passes_through() {
        let options = RequestOptions::new().with_field("github").unwrap();
        assert_eq!(options.to_query_string(), "?fields=github");
    }

    #[test]
    fn test_empty_field_set_omits_fields() {
        let mut options = RequestOptions::new();
        options.set_fields(Vec::<String>::new()).unwrap();
        options.set_human_readable(true).unwrap();
        assert_eq!(options.to_query_string(), "?output=human");
    }

    #[test]
    fn test_fields_precede_output() {
        let options = RequestOptions::new()
            .with_human_readable(true)
            .unwrap()
            .with_field("name")
            .unwrap();
        assert_eq!(options.to_query_string(), "?fields=name&output=human");
    }

    #[test]
    fn test_human_readable_false_omits_output() {
        let options = RequestOptions::new()
            .with_field("name")
            .unwrap()
            .with_human_readable(false)
            .unwrap();
        assert!(!options.to_query_string().contains("output="));
    }

    #[test]
    fn test_minimal_preset_renders_in_order() {
        assert_eq!(
            RequestOptions::minimal().to_query_string(),
            "?fields=name,version,versions"
        );
    }

    #[test]
    fn test_unspecified_preset_renders_empty() {
        assert_eq!(RequestOptions::unspecified().to_query_string(), "");
    }

    #[test]
    fn test_all_preset_requests_every_wire_name() {
        let query = RequestOptions::all().to_query_string();
        let fields = query.strip_prefix("?fields=").unwrap();
        let tokens: Vec<_> = fields.split(',').collect();
        assert_eq!(tokens.len(), field_names().wire_names().len());
        assert!(tokens.contains(&"rawFiles"));
        assert!(tokens.contains(&"latest"));
    }

    #[test]
    fn test_presets_reject_mutation() {
        for mut preset in [
            RequestOptions::unspecified(),
            RequestOptions::minimal(),
            RequestOptions::all(),
        ] {
            let before = preset.to_query_string();

            assert!(matches!(
                preset.add_field("author"),
                Err(CdnJsError::InvalidOperation(_))
            ));
            assert!(matches!(
                preset.remove_field("name"),
                Err(CdnJsError::InvalidOperation(_))
            ));
            assert!(matches!(
                preset.clear_fields(),
                Err(CdnJsError::InvalidOperation(_))
            ));
            assert!(matches!(
                preset.set_human_readable(true),
                Err(CdnJsError::InvalidOperation(_))
            ));

            assert_eq!(preset.to_query_string(), before);
            assert_eq!(preset.to_query_string(), before);
        }
    }

    #[test]
    fn test_fragment_marker_in_field_is_rejected() {
        let mut options = RequestOptions::new();
        options.add_field("name").unwrap();

        assert!(matches!(
            options.add_field("a#b"),
            Err(CdnJsError::InvalidArgument { name: "field" })
        ));
        assert!(matches!(
            options.set_fields(["version", "#"]),
            Err(CdnJsError::InvalidArgument { name: "field" })
        ));
        assert_eq!(options.to_query_string(), "?fields=name");

        let mut search = SearchRequestOptions::with_options("vue", options);
        assert!(search.options_mut().add_field("x#").is_err());
        assert_eq!(search.to_query_string(), "?fields=name&search=vue");
    }

    #[test]
    fn test_to_mutable_leaves_preset_untouched() {
        let mut options = RequestOptions::minimal().to_mutable();
        options.add_field("description").unwrap();

        assert_eq!(
            options.to_query_string(),
            "?fields=name,version,versions,description"
        );
        assert_eq!(
            RequestOptions::minimal().to_query_string(),
            "?fields=name,version,versions"
        );
    }

    #[test]
    fn test_search_only() {
        let options = SearchRequestOptions::new("jquery");
        assert_eq!(options.to_query_string(), "?search=jquery");
    }

    #[test]
    fn test_search_follows_base_parameters() {
        let mut options = SearchRequestOptions::new("vue");
        options.options_mut().set_human_readable(true).unwrap();
        options.options_mut().add_field("name").unwrap();
        assert_eq!(
            options.to_query_string(),
            "?fields=name&output=human&search=vue"
        );
    }

    #[test]
    fn test_search_is_escaped() {
        let options = SearchRequestOptions::new("a&b=c d/é");
        assert_eq!(
            options.to_query_string(),
            "?search=a%26b%3Dc%20d%2F%C3%A9"
        );
    }

    #[test]
    fn test_cleared_search_is_omitted() {
        let mut options = SearchRequestOptions::with_options("x", RequestOptions::minimal());
        options.set_search(None);
        assert_eq!(options.search(), None);
        assert_eq!(options.to_query_string(), "?fields=name,version,versions");

        options.set_search(Some(String::new()));
        assert_eq!(options.to_query_string(), "?fields=name,version,versions");
    }

    #[test]
    fn test_display_matches_query_string() {
        let options = SearchRequestOptions::new("react");
        assert_eq!(options.to_string(), options.to_query_string());
        assert_eq!(RequestOptions::minimal().to_string(), "?fields=name,version,versions");
    }
}
