//! Mapping between short gateway/document names and class identifiers.
//!
//! ```text
//! \Custom\Gateway     => \Custom\Gateway
//! Offline             => \Argentum\Offline\Gateway
//! Other\Express       => \Argentum\Other\ExpressGateway
//! Other_Express       => \Argentum\Other\ExpressGateway
//! ```

use argentum_core::helper::ucfirst;

pub const DEFAULT_ROOT_NAMESPACE: &str = "Argentum";

const SEPARATOR: char = '\\';
const GATEWAY_SUFFIX: &str = "Gateway";

/// Resolve a short gateway name to a fully qualified class identifier.
///
/// Names starting with `\` are already qualified and returned unchanged.
pub fn gateway_class_name(short_name: &str, root: &str) -> String {
    if short_name.starts_with(SEPARATOR) {
        return short_name.to_string();
    }

    let mut path = short_name.replace('_', "\\");
    if !path.contains(SEPARATOR) {
        path.push(SEPARATOR);
    }

    format!("\\{root}\\{path}{GATEWAY_SUFFIX}")
}

/// Inverse of [`gateway_class_name`] for classes under `root`.
///
/// Classes outside the root come back fully qualified.
pub fn gateway_short_name(class_name: &str, root: &str) -> String {
    let class = class_name.strip_prefix(SEPARATOR).unwrap_or(class_name);

    let under_root = class
        .strip_prefix(root)
        .is_some_and(|rest| rest.starts_with(SEPARATOR));
    if !under_root {
        return format!("\\{class}");
    }

    let end = class.len().saturating_sub(GATEWAY_SUFFIX.len());
    let inner = class.get(root.len()..end).unwrap_or_default();
    inner.replace(SEPARATOR, "_").trim_matches('_').to_string()
}

/// Namespace of the class a short gateway name resolves to.
pub fn gateway_namespace(short_name: &str, root: &str) -> String {
    let class = gateway_class_name(short_name, root);
    match class.rfind(SEPARATOR) {
        Some(idx) => class[..idx].to_string(),
        None => String::new(),
    }
}

/// Class of a generic document shipped with the core.
pub fn core_document_class_name(name: &str, root: &str) -> String {
    format!("\\{root}\\Common\\Document\\{}", document_path(name))
}

/// Document class for `name` as seen from `gateway`.
///
/// The gateway's own `Document` namespace wins when `exists` knows the
/// class; otherwise the core document of the same name is used.
pub fn document_class_name(
    name: &str,
    gateway: &str,
    root: &str,
    exists: impl Fn(&str) -> bool,
) -> String {
    let specific = format!(
        "{}\\Document\\{}",
        gateway_namespace(gateway, root),
        document_path(name)
    );
    if exists(&specific) {
        return specific;
    }

    tracing::debug!(document = name, gateway, "falling back to core document");
    core_document_class_name(name, root)
}

fn document_path(name: &str) -> String {
    ucfirst(name).replace('_', "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = DEFAULT_ROOT_NAMESPACE;

    #[test]
    fn resolves_gateway_class_names() {
        assert_eq!(gateway_class_name("\\Custom\\Gateway", ROOT), "\\Custom\\Gateway");
        assert_eq!(gateway_class_name("\\Custom_Gateway", ROOT), "\\Custom_Gateway");
        assert_eq!(
            gateway_class_name("FacturacionModerna", ROOT),
            "\\Argentum\\FacturacionModerna\\Gateway"
        );
        assert_eq!(gateway_class_name("Other\\Express", ROOT), "\\Argentum\\Other\\ExpressGateway");
        assert_eq!(gateway_class_name("Other_Express", ROOT), "\\Argentum\\Other\\ExpressGateway");
        assert_eq!(gateway_class_name("Offline", "Fiscal"), "\\Fiscal\\Offline\\Gateway");
    }

    #[test]
    fn short_name_inverts_class_name() {
        assert_eq!(gateway_short_name("\\Argentum\\Offline\\Gateway", ROOT), "Offline");
        assert_eq!(gateway_short_name("Argentum\\Other\\ExpressGateway", ROOT), "Other_Express");
        assert_eq!(gateway_short_name("\\Custom\\Gateway", ROOT), "\\Custom\\Gateway");
        assert_eq!(gateway_short_name("ArgentumX\\Gateway", ROOT), "\\ArgentumX\\Gateway");

        for short in ["Offline", "Other_Express", "FacturacionModerna"] {
            let class = gateway_class_name(short, ROOT);
            assert_eq!(gateway_short_name(&class, ROOT), short);
        }
    }

    #[test]
    fn namespace_strips_the_class() {
        assert_eq!(gateway_namespace("Offline", ROOT), "\\Argentum\\Offline");
        assert_eq!(gateway_namespace("Other_Express", ROOT), "\\Argentum\\Other");
        assert_eq!(gateway_namespace("\\Custom\\Gateway", ROOT), "\\Custom");
    }

    #[test]
    fn document_class_prefers_gateway_specific() {
        let known = |class: &str| class == "\\Argentum\\Offline\\Document\\Invoice";

        assert_eq!(
            document_class_name("invoice", "Offline", ROOT, known),
            "\\Argentum\\Offline\\Document\\Invoice"
        );
        assert_eq!(
            document_class_name("creditNote", "Offline", ROOT, known),
            "\\Argentum\\Common\\Document\\CreditNote"
        );
        assert_eq!(
            document_class_name("sub_ticket", "Other", ROOT, |_| false),
            "\\Argentum\\Common\\Document\\Sub\\ticket"
        );
    }
}
