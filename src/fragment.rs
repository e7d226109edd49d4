//! Route fragment codec.
//!
//! A route is shown in the address bar as a URL fragment:
//!
//! ```text
//! #<name>[?<key>[=<value>]&<key>[=<value>]...]
//! ```
//!
//! Name, keys and values are percent-encoded, keys are written in ascending
//! order, and a bare key (no `=`) stands for a parameter without a value. The
//! functions here are total: malformed input gives `None` or empty parameters,
//! never a partially decoded result.
//!
//! # Example
//!
//! ```
//! use navigator_history::fragment::{build_fragment, fragment_name, fragment_parameters};
//! use navigator_history::FragmentParams;
//!
//! let params = FragmentParams::new().with("id", "5").with_flag("edit");
//! let fragment = build_fragment("detail view", &params);
//! assert_eq!(fragment, "#detail%20view?edit&id=5");
//!
//! assert_eq!(fragment_name(&fragment).as_deref(), Some("detail view"));
//! assert_eq!(fragment_parameters(&fragment), params);
//! ```

use crate::params::FragmentParams;
use std::borrow::Cow;
use std::fmt;

/// Build a fragment from a route name and its parameters.
///
/// No `?` is written when `parameters` is empty.
pub fn build_fragment(name: &str, parameters: &FragmentParams) -> String {
    let mut fragment = String::with_capacity(name.len() + 1);
    fragment.push('#');
    fragment.push_str(&urlencoding::encode(name));

    if !parameters.is_empty() {
        fragment.push('?');
        let pairs: Vec<String> = parameters
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                ),
                None => urlencoding::encode(key).into_owned(),
            })
            .collect();
        fragment.push_str(&pairs.join("&"));
    }

    fragment
}

/// Extract the route name: the text between the first `#` and the last `?`.
///
/// Returns `None` when there is no `#`, the name is blank, the name region
/// still holds a `#` or `?` (`#a#`, `#a??b`), or it does not percent-decode.
pub fn fragment_name(fragment: &str) -> Option<String> {
    let (_, after_hash) = fragment.split_once('#')?;
    let name = match after_hash.rfind('?') {
        Some(query_start) => &after_hash[..query_start],
        None => after_hash,
    };

    if name.trim().is_empty() || name.contains(['#', '?']) {
        return None;
    }

    decode_component(name)
}

/// Extract the parameters: everything after the last `?`.
///
/// Empty tokens (`&&`, trailing `&`) are skipped, each token is split on its
/// first `=`, and a repeated key keeps its last value. Any token that fails to
/// percent-decode makes the whole result empty.
pub fn fragment_parameters(fragment: &str) -> FragmentParams {
    let Some((_, query)) = fragment.rsplit_once('?') else {
        return FragmentParams::new();
    };

    let mut params = FragmentParams::new();
    for token in query.split('&').filter(|token| !token.is_empty()) {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (token, None),
        };

        let Some(key) = decode_component(key) else {
            return FragmentParams::new();
        };
        let value = match value.map(decode_component) {
            Some(Some(value)) => Some(value),
            Some(None) => return FragmentParams::new(),
            None => None,
        };
        params.set(key, value);
    }

    params
}

/// Percent-decode one component, rejecting stray `%` and invalid UTF-8.
fn decode_component(raw: &str) -> Option<String> {
    let escapes_valid = raw.split('%').skip(1).all(|chunk| {
        chunk
            .get(..2)
            .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
    });
    if !escapes_valid {
        return None;
    }

    urlencoding::decode(raw).ok().map(Cow::into_owned)
}

// ============================================================================
// RouteFragment
// ============================================================================

/// A parsed fragment: route name plus parameters.
///
/// Handy inside the `serialize`/`deserialize` pair handed to
/// [`BrowserHistory::bind`](crate::history::BrowserHistory::bind):
///
/// ```
/// use navigator_history::RouteFragment;
///
/// #[derive(Debug, PartialEq)]
/// enum Screen { Main, Detail(u32) }
///
/// fn save(screen: &Screen) -> Option<String> {
///     Some(match screen {
///         Screen::Main => RouteFragment::new("main").to_string(),
///         Screen::Detail(id) => RouteFragment::new("detail").with_param("id", id.to_string()).to_string(),
///     })
/// }
///
/// fn restore(fragment: &str) -> Option<Screen> {
///     let route = RouteFragment::parse(fragment)?;
///     match route.name.as_str() {
///         "main" => Some(Screen::Main),
///         "detail" => Some(Screen::Detail(route.params.get_as("id")?)),
///         _ => None,
///     }
/// }
///
/// let saved = save(&Screen::Detail(7)).unwrap();
/// assert_eq!(saved, "#detail?id=7");
/// assert_eq!(restore(&saved), Some(Screen::Detail(7)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteFragment {
    /// Decoded route name
    pub name: String,
    /// Decoded parameters
    pub params: FragmentParams,
}

impl RouteFragment {
    /// Fragment with a name and no parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: FragmentParams::new(),
        }
    }

    /// Add a `key=value` parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Add a bare key.
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.params.insert_flag(key);
        self
    }

    /// Parse a fragment. `None` if the name is malformed.
    pub fn parse(fragment: &str) -> Option<Self> {
        Some(Self {
            name: fragment_name(fragment)?,
            params: fragment_parameters(fragment),
        })
    }

    /// Encode back into `#name?...` form.
    pub fn to_fragment(&self) -> String {
        build_fragment(&self.name, &self.params)
    }
}

impl fmt::Display for RouteFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fragment())
    }
}

// ============================================================================
// Tests
// ============================================================================
