//! Sort links for listing headers.
//!
//! A [`SortLink`] describes one sortable column header. Rendering it against
//! the current [`SortState`] yields the target URL, icon and label of the
//! link that toggles the sort on that column.

use std::borrow::Cow;
use std::fmt;

use relsort_conf::SortSettings;
use relsort_orm::{SortDirection, SortState};
use serde::{Deserialize, Serialize};

/// Icon family used for an active link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconType {
	/// Plain sort arrows
	#[default]
	Default,
	/// Numeric sort icons
	Numeric,
	/// Alphabetic sort icons
	Alpha,
}

impl IconType {
	/// Icon class for an active link whose next direction is `next`.
	pub fn active_class(&self, next: SortDirection) -> String {
		let suffix = match next {
			SortDirection::Asc => "up",
			SortDirection::Desc => "down",
		};
		match self {
			Self::Default => format!("bi-sort-{suffix}"),
			Self::Numeric => format!("bi-sort-numeric-{suffix}"),
			Self::Alpha => format!("bi-sort-alpha-{suffix}"),
		}
	}
}

/// Icon class of an inactive link.
pub const INACTIVE_ICON: &str = "bi-arrow-down-up";
/// CSS class of the link for the sorted column.
pub const ACTIVE_CLASS: &str = "link-primary";
/// CSS class of every other link.
pub const INACTIVE_CLASS: &str = "link-dark";

/// A sortable column header.
///
/// # Examples
///
/// ```rust
/// use relsort_conf::SortSettings;
/// use relsort_orm::{SortDirection, SortSource, SortState};
/// use relsort_rest::{IconType, SortLink};
///
/// let state = SortState {
///     column: "name".to_string(),
///     direction: SortDirection::Asc,
///     source: SortSource::Request,
/// };
/// let link = SortLink::new("name")
///     .with_icon_type(IconType::Alpha)
///     .with_base_url("/users")
///     .render(Some(&state), &SortSettings::default());
///
/// assert!(link.active);
/// assert_eq!(link.href, "/users?sort=name&direction=desc");
/// assert_eq!(link.icon, "bi-sort-alpha-down");
/// assert_eq!(link.label, "Sort descending");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortLink {
	column: String,
	title: Option<String>,
	icon_type: IconType,
	base_url: String,
	query: Vec<(String, String)>,
	classes: Vec<String>,
}

impl SortLink {
	/// Create a link sorting by `column`.
	pub fn new(column: impl Into<String>) -> Self {
		Self {
			column: column.into(),
			base_url: "/".to_string(),
			..Default::default()
		}
	}

	/// Text of the link. Defaults to the column with an upper-cased first
	/// letter.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Icon family shown when the link is active.
	pub fn with_icon_type(mut self, icon_type: IconType) -> Self {
		self.icon_type = icon_type;
		self
	}

	/// URL the link points to. Any query string on it is dropped.
	///
	/// Either an absolute URL or a path.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Keep an extra query parameter on the link, such as a search term.
	pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}

	/// Extra CSS class on the anchor.
	pub fn with_class(mut self, class: impl Into<String>) -> Self {
		self.classes.push(class.into());
		self
	}

	/// Column this link sorts by.
	pub fn column(&self) -> &str {
		&self.column
	}

	/// Resolved title.
	pub fn title(&self) -> Cow<'_, str> {
		match &self.title {
			Some(title) => Cow::Borrowed(title.as_str()),
			None => Cow::Owned(ucfirst(&self.column)),
		}
	}

	/// Render against the current sort.
	pub fn render(&self, state: Option<&SortState>, settings: &SortSettings) -> RenderedLink {
		let active = state.is_some_and(|state| state.is_sorted_by(&self.column));
		let next_direction = match state {
			Some(state) if active => state.direction.toggle(),
			_ => SortDirection::Asc,
		};

		let (icon, label) = if active {
			let label = match next_direction {
				SortDirection::Asc => &settings.labels.sort_ascending,
				SortDirection::Desc => &settings.labels.sort_descending,
			};
			(self.icon_type.active_class(next_direction), label.clone())
		} else {
			(INACTIVE_ICON.to_string(), settings.labels.sort.clone())
		};

		let mut class = if active { ACTIVE_CLASS } else { INACTIVE_CLASS }.to_string();
		for extra in &self.classes {
			class.push(' ');
			class.push_str(extra);
		}

		RenderedLink {
			href: self.href(next_direction, settings),
			title: self.title().into_owned(),
			label,
			icon,
			class,
			active,
			next_direction,
		}
	}

	fn href(&self, direction: SortDirection, settings: &SortSettings) -> String {
		let pairs: Vec<(&str, &str)> = self
			.query
			.iter()
			.filter(|(key, _)| *key != settings.sort_param && *key != settings.direction_param)
			.map(|(key, value)| (key.as_str(), value.as_str()))
			.chain([
				(settings.sort_param.as_str(), self.column.as_str()),
				(settings.direction_param.as_str(), direction.as_str()),
			])
			.collect();

		match url::Url::parse(&self.base_url) {
			Ok(mut url) => {
				url.set_query(None);
				url.set_fragment(None);
				url.query_pairs_mut().extend_pairs(pairs);
				url.to_string()
			}
			Err(_) => {
				let path = self
					.base_url
					.split(['?', '#'])
					.next()
					.filter(|path| !path.is_empty())
					.unwrap_or("/");
				let query = url::form_urlencoded::Serializer::new(String::new())
					.extend_pairs(pairs)
					.finish();
				format!("{path}?{query}")
			}
		}
	}
}

/// A [`SortLink`] rendered against the current sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLink {
	/// Target URL
	pub href: String,
	/// Link text
	pub title: String,
	/// Accessible label, used as the `title` attribute
	pub label: String,
	/// Icon class
	pub icon: String,
	/// CSS classes of the anchor
	pub class: String,
	/// Whether the listing is sorted by this link's column
	pub active: bool,
	/// Direction the link requests
	pub next_direction: SortDirection,
}

impl RenderedLink {
	/// Render as an HTML anchor.
	pub fn to_html(&self) -> String {
		format!(
			r#"<a class="{}" href="{}" title="{}">{}<span class="ms-1 {}"></span></a>"#,
			html_escape(&self.class),
			html_escape(&self.href),
			html_escape(&self.label),
			html_escape(&self.title),
			html_escape(&self.icon),
		)
	}
}

impl fmt::Display for RenderedLink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_html())
	}
}

fn ucfirst(s: &str) -> String {
	let mut chars = s.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

pub(crate) fn html_escape(s: &str) -> Cow<'_, str> {
	if !s.contains(['&', '<', '>', '"', '\'']) {
		return Cow::Borrowed(s);
	}
	let mut escaped = String::with_capacity(s.len() + 8);
	for c in s.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
	use super::*;
	use relsort_conf::SortLabels;
	use relsort_orm::{SortSource, resolve_sort};
	use rstest::rstest;

	fn state(column: &str, direction: SortDirection) -> SortState {
		SortState {
			column: column.to_string(),
			direction,
			source: SortSource::Request,
		}
	}

	#[rstest]
	fn test_inactive_link() {
		let link = SortLink::new("email").render(None, &SortSettings::default());

		assert!(!link.active);
		assert_eq!(link.next_direction, SortDirection::Asc);
		assert_eq!(link.icon, INACTIVE_ICON);
		assert_eq!(link.label, "Sort");
		assert_eq!(link.class, "link-dark");
		assert_eq!(link.title, "Email");
		assert_eq!(link.href, "/?sort=email&direction=asc");
	}

	#[rstest]
	fn test_other_column_sorted_is_inactive() {
		let current = state("name", SortDirection::Desc);
		let link = SortLink::new("email").render(Some(&current), &SortSettings::default());

		assert!(!link.active);
		assert_eq!(link.next_direction, SortDirection::Asc);
	}

	#[rstest]
	#[case(IconType::Default, SortDirection::Asc, "bi-sort-down", "Sort descending", "desc")]
	#[case(IconType::Default, SortDirection::Desc, "bi-sort-up", "Sort ascending", "asc")]
	#[case(IconType::Numeric, SortDirection::Asc, "bi-sort-numeric-down", "Sort descending", "desc")]
	#[case(IconType::Alpha, SortDirection::Desc, "bi-sort-alpha-up", "Sort ascending", "asc")]
	fn test_active_link_toggles(
		#[case] icon_type: IconType,
		#[case] current: SortDirection,
		#[case] icon: &str,
		#[case] label: &str,
		#[case] next: &str,
	) {
		let current = state("price", current);
		let link = SortLink::new("price")
			.with_icon_type(icon_type)
			.render(Some(&current), &SortSettings::default());

		assert!(link.active);
		assert_eq!(link.icon, icon);
		assert_eq!(link.label, label);
		assert_eq!(link.class, "link-primary");
		assert_eq!(link.next_direction.as_str(), next);
	}

	#[rstest]
	fn test_active_link_without_direction_param_requests_desc() {
		let current = resolve_sort(Some("name"), None, None, SortDirection::Asc).unwrap();

		let link = SortLink::new("name").render(Some(&current), &SortSettings::default());

		assert!(link.active);
		assert_eq!(link.next_direction, SortDirection::Desc);
		assert_eq!(link.href, "/?sort=name&direction=desc");
	}

	#[rstest]
	fn test_extra_query_precedes_sort_pairs() {
		let link = SortLink::new("author.name")
			.with_base_url("/posts?page=4")
			.with_query_param("search", "rust & go")
			.with_query_param("sort", "stale")
			.render(None, &SortSettings::default());

		assert_eq!(
			link.href,
			"/posts?search=rust+%26+go&sort=author.name&direction=asc"
		);
	}

	#[rstest]
	fn test_absolute_base_url() {
		let link = SortLink::new("name")
			.with_base_url("https://example.com/admin/users?old=1")
			.render(None, &SortSettings::default());

		assert_eq!(
			link.href,
			"https://example.com/admin/users?sort=name&direction=asc"
		);
	}

	#[rstest]
	fn test_absolute_root_url() {
		let link = SortLink::new("name")
			.with_base_url("https://example.com")
			.render(None, &SortSettings::default());

		assert_eq!(link.href, "https://example.com/?sort=name&direction=asc");
	}

	#[rstest]
	fn test_configured_names_and_labels() {
		let settings = SortSettings::new()
			.with_sort_param("o")
			.with_direction_param("d")
			.with_labels(SortLabels {
				sort: "Trier".into(),
				sort_ascending: "Tri croissant".into(),
				sort_descending: "Tri décroissant".into(),
			});
		let link = SortLink::new("name").render(None, &settings);

		assert_eq!(link.href, "/?o=name&d=asc");
		assert_eq!(link.label, "Trier");
	}

	#[rstest]
	fn test_to_html_escapes() {
		let html = SortLink::new("name")
			.with_title("<Name>")
			.with_class("fw-bold")
			.with_query_param("q", "\"x\"")
			.render(None, &SortSettings::default())
			.to_html();

		assert_eq!(
			html,
			r#"<a class="link-dark fw-bold" href="/?q=%22x%22&amp;sort=name&amp;direction=asc" title="Sort">&lt;Name&gt;<span class="ms-1 bi-arrow-down-up"></span></a>"#
		);
	}

	#[rstest]
	#[case("", "")]
	#[case("name", "Name")]
	#[case("émail", "Émail")]
	fn test_ucfirst(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(ucfirst(input), expected);
	}

	#[rstest]
	fn test_html_escape_borrows_clean_input() {
		assert!(matches!(html_escape("plain"), Cow::Borrowed("plain")));
	}
}
