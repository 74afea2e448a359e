//! Derived-accessor conventions and regeneration
//!
//! The accessor is the sibling `*.Designer.cs` source file: one static
//! string property per resource key, regenerated wholesale after every
//! merge. It is never hand-edited and never authoritative; its namespace
//! and class name are recovered from the previous generation so the
//! hosting project keeps compiling against the same type.

use crate::document::ResxDocument;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace and class recovered from an existing designer file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesignerInfo {
    pub namespace: String,
    pub class_name: String,
}

/// Sibling designer path for a resource file
///
/// `Resources.resx` maps to `Resources.Designer.cs` next to it.
pub fn designer_path(resx_path: &Path) -> PathBuf {
    resx_path.with_extension("Designer.cs")
}

/// Recover the namespace and class declaration from designer source.
///
/// The artifact is machine-generated, so a pair of declaration regexes is
/// enough; both block-scoped and file-scoped namespaces match.
pub fn parse_designer(source: &str) -> Option<DesignerInfo> {
    let namespace_re = Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_][A-Za-z0-9_.]*)").ok()?;
    let class_re = Regex::new(r"(?m)^\s*(?:\w+\s+)*class\s+([A-Za-z_][A-Za-z0-9_]*)").ok()?;

    let namespace = namespace_re.captures(source)?.get(1)?.as_str().to_string();
    let class_name = class_re.captures(source)?.get(1)?.as_str().to_string();

    Some(DesignerInfo {
        namespace,
        class_name,
    })
}

/// Fully-qualified accessor type name for a resource file.
///
/// Empty string when the designer is missing, unreadable, or has no
/// locatable namespace/class declaration.
pub fn get_class_name(resx_path: &Path) -> String {
    let Ok(source) = fs::read_to_string(designer_path(resx_path)) else {
        return String::new();
    };
    match parse_designer(&source) {
        Some(info) => format!("{}.{}", info.namespace, info.class_name),
        None => String::new(),
    }
}

/// Regenerate the designer file for a resource file.
///
/// Reads the current key set, preserves the previously-determined namespace
/// and class name, and rewrites the artifact with one member per key.
/// Returns `false` on any failure: missing or unparseable previous
/// artifact, unreadable resource file, write failure, or keys that could
/// not become members. The resource file itself is never touched.
pub fn regenerate_designer(resx_path: &Path) -> bool {
    let designer = designer_path(resx_path);
    let Ok(previous) = fs::read_to_string(&designer) else {
        return false;
    };
    let Some(info) = parse_designer(&previous) else {
        return false;
    };
    let Ok(source) = fs::read_to_string(resx_path) else {
        return false;
    };
    let Ok(doc) = ResxDocument::parse(&source) else {
        return false;
    };
    let Some(base_name) = resx_path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };

    let (generated, unmatched) = generate_designer_source(&info, base_name, &doc);
    if fs::write(&designer, generated).is_err() {
        return false;
    }

    unmatched.is_empty()
}

/// Generate designer source for the document's key set.
///
/// Output is a deterministic function of the inputs: members appear in
/// resource-file order and regenerating twice without an intervening add
/// yields byte-identical text. Returns the source together with the keys
/// that could not become members (empty after sanitization, or colliding
/// with an earlier member or a reserved one); those are skipped but the
/// remaining members are still generated.
pub fn generate_designer_source(
    info: &DesignerInfo,
    base_name: &str,
    doc: &ResxDocument,
) -> (String, Vec<String>) {
    let mut out = String::new();
    let mut unmatched = Vec::new();

    // Members of the accessor class itself are off-limits for resources.
    let mut used: HashSet<String> =
        ["ResourceManager".to_string(), "Culture".to_string()].into();

    out.push_str("//------------------------------------------------------------------------------\n");
    out.push_str("// <auto-generated>\n");
    out.push_str("//     This code was generated by a tool.\n");
    out.push_str("//     Changes to this file may cause incorrect behavior and will be lost if\n");
    out.push_str("//     the code is regenerated.\n");
    out.push_str("// </auto-generated>\n");
    out.push_str("//------------------------------------------------------------------------------\n");
    out.push('\n');
    out.push_str(&format!("namespace {} {{\n", info.namespace));
    out.push_str("    using System;\n");
    out.push('\n');
    out.push('\n');
    out.push_str("    /// <summary>\n");
    out.push_str("    ///   A strongly-typed resource class, for looking up localized strings, etc.\n");
    out.push_str("    /// </summary>\n");
    out.push_str("    [global::System.CodeDom.Compiler.GeneratedCodeAttribute(\"System.Resources.Tools.StronglyTypedResourceBuilder\", \"4.0.0.0\")]\n");
    out.push_str("    [global::System.Diagnostics.DebuggerNonUserCodeAttribute()]\n");
    out.push_str("    [global::System.Runtime.CompilerServices.CompilerGeneratedAttribute()]\n");
    out.push_str(&format!("    internal class {} {{\n", info.class_name));
    out.push('\n');
    out.push_str("        private static global::System.Resources.ResourceManager resourceMan;\n");
    out.push('\n');
    out.push_str("        private static global::System.Globalization.CultureInfo resourceCulture;\n");
    out.push('\n');
    out.push_str(&format!("        internal {}() {{\n", info.class_name));
    out.push_str("        }\n");
    out.push('\n');
    out.push_str("        /// <summary>\n");
    out.push_str("        ///   Returns the cached ResourceManager instance used by this class.\n");
    out.push_str("        /// </summary>\n");
    out.push_str("        internal static global::System.Resources.ResourceManager ResourceManager {\n");
    out.push_str("            get {\n");
    out.push_str("                if (object.ReferenceEquals(resourceMan, null)) {\n");
    out.push_str(&format!(
        "                    global::System.Resources.ResourceManager temp = new global::System.Resources.ResourceManager(\"{}.{}\", typeof({}).Assembly);\n",
        info.namespace, base_name, info.class_name
    ));
    out.push_str("                    resourceMan = temp;\n");
    out.push_str("                }\n");
    out.push_str("                return resourceMan;\n");
    out.push_str("            }\n");
    out.push_str("        }\n");
    out.push('\n');
    out.push_str("        /// <summary>\n");
    out.push_str("        ///   Overrides the current thread's CurrentUICulture property for all\n");
    out.push_str("        ///   resource lookups using this strongly typed resource class.\n");
    out.push_str("        /// </summary>\n");
    out.push_str("        internal static global::System.Globalization.CultureInfo Culture {\n");
    out.push_str("            get {\n");
    out.push_str("                return resourceCulture;\n");
    out.push_str("            }\n");
    out.push_str("            set {\n");
    out.push_str("                resourceCulture = value;\n");
    out.push_str("            }\n");
    out.push_str("        }\n");

    for entry in doc.entries() {
        let Some(member) = member_name_for_key(&entry.name) else {
            unmatched.push(entry.name.clone());
            continue;
        };
        if !used.insert(member.clone()) {
            unmatched.push(entry.name.clone());
            continue;
        }

        out.push('\n');
        out.push_str("        /// <summary>\n");
        out.push_str(&format!(
            "        ///   Looks up a localized string similar to {}.\n",
            summary_preview(&entry.value)
        ));
        out.push_str("        /// </summary>\n");
        out.push_str(&format!("        internal static string {} {{\n", member));
        out.push_str("            get {\n");
        out.push_str(&format!(
            "                return ResourceManager.GetString(\"{}\", resourceCulture);\n",
            entry.name.replace('\\', "\\\\").replace('"', "\\\"")
        ));
        out.push_str("            }\n");
        out.push_str("        }\n");
    }

    out.push_str("    }\n");
    out.push_str("}\n");

    (out, unmatched)
}

/// Turn a resource key into a member identifier.
///
/// Non-identifier characters become `_`, a leading digit gets a `_` prefix.
/// Returns `None` when nothing usable remains.
pub fn member_name_for_key(key: &str) -> Option<String> {
    if key.trim().is_empty() {
        return None;
    }

    let mut member: String = key
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if member.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false) {
        member.insert(0, '_');
    }

    Some(member)
}

/// Shortened value text for the member's doc comment
fn summary_preview(value: &str) -> String {
    let single_line = value.replace(['\r', '\n'], " ");
    let escaped = crate::document::escape_xml(&single_line);
    if escaped.len() <= 80 {
        escaped
    } else {
        let mut cut = 80;
        while !escaped.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{} [rest of string was truncated]", &escaped[..cut])
    }
}
