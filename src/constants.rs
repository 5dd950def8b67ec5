//! Constants shared across generation passes.
//!
//! Registry path roots, the call shapes the template/layout scanner looks for,
//! and limits that guard the resolution worklist.

/// Root segment for every path written by the builder passes.
pub const REGISTRY_ROOT: &str = "builder";

/// Registry branch holding compiled custom tabs, keyed by view.
pub const CUSTOM_TABS_BRANCH: &str = "custom_tabs";

/// Registry branch holding resolved templates, keyed by target, view and name.
pub const TEMPLATE_DATA_BRANCH: &str = "template_data";

/// Registry branch holding resolved layouts, keyed by target and name.
pub const LAYOUT_DATA_BRANCH: &str = "layout_data";

/// Default maximum depth of the template/layout resolution worklist.
///
/// The registry presence check ends resolution well before this depth. The
/// limit only triggers when that guard is bypassed by malformed data.
pub const DEFAULT_MAX_RESOLVE_DEPTH: usize = 32;

/// Name given to custom tabs that arrive without a usable name.
pub const DEFAULT_TAB_NAME: &str = "Tab";

/// Literal markers that show a tab body already carries its own scaffold.
pub const TAB_OPEN_MARKER: &str = "bootstrap.addTab";
/// See [`TAB_OPEN_MARKER`].
pub const TAB_CLOSE_MARKER: &str = "bootstrap.endTab";

/// One level of indentation in generated markup.
pub const INDENT_UNIT: &str = "\t";

/// Opening and closing tokens for `$this->loadTemplate('name')`.
pub const TEMPLATE_CALL_SINGLE: (&str, &str) = ("$this->loadTemplate('", "')");
/// Opening and closing tokens for `$this->loadTemplate("name")`.
pub const TEMPLATE_CALL_DOUBLE: (&str, &str) = ("$this->loadTemplate(\"", "\")");
/// Opening and closing tokens for `JLayoutHelper::render('name', ...)`.
pub const LAYOUT_CALL_SINGLE: (&str, &str) = ("JLayoutHelper::render('", "',");
/// Opening and closing tokens for `JLayoutHelper::render("name", ...)`.
pub const LAYOUT_CALL_DOUBLE: (&str, &str) = ("JLayoutHelper::render(\"", "\",");
