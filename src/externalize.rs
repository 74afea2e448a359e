//! Selection externalization flow
//!
//! Moves a selected string literal out of the editor into a resource file
//! and replaces the selection with a `Namespace.Class.Key` accessor
//! reference. The editor and the file/key prompt are collaborator traits;
//! hosts implement them against their own UI, and the CLI and tests drive
//! them directly.

use crate::designer::get_class_name;
use crate::store;
use crate::types::ResxError;
use crate::workspace::find_first_matching_value_in;
use std::path::{Path, PathBuf};

/// Editor collaborator: the current selection and its replacement
pub trait EditorSurface {
    fn selected_text(&self) -> String;
    fn replace_selection(&mut self, text: &str);
}

/// What the prompt is opened with
#[derive(Debug, Clone, Copy)]
pub struct PromptSeed<'a> {
    /// Candidate resource files, in workspace enumeration order
    pub files: &'a [PathBuf],
    /// Key suggestion, present when an existing entry already holds the
    /// selected value
    pub suggested_key: Option<&'a str>,
    /// File to preselect, present together with `suggested_key`
    pub preselected_file: Option<&'a Path>,
}

/// What the prompt returns on accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptChoice {
    pub file: PathBuf,
    pub key: String,
}

/// Modal prompt collaborator; `None` means the user cancelled
pub trait ResourcePrompt {
    fn choose(&mut self, seed: PromptSeed<'_>) -> Option<PromptChoice>;
}

/// Result of one externalization attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalizeOutcome {
    /// Selection replaced with an accessor reference; `reused` is set when
    /// an existing entry already held the value and nothing was written
    Replaced {
        file: PathBuf,
        key: String,
        reused: bool,
    },
    /// The chosen key already exists in the chosen file; nothing written
    DuplicateKey { file: PathBuf, key: String },
    /// Entry written but the accessor class name could not be resolved;
    /// the selection is left untouched
    AccessorMissing { file: PathBuf, key: String },
    /// Entry written but designer regeneration failed; the resource file
    /// is ahead of its accessor and the selection is left untouched
    RegenerationFailed { file: PathBuf, key: String },
    /// The user cancelled the prompt
    Cancelled,
    /// Nothing selected in the editor
    NoSelection,
}

/// Externalize the editor's current selection into one of `files`.
///
/// An existing entry with the same value is reused instead of creating a
/// duplicate; otherwise the prompt picks the target file and key, the
/// entry is appended, and the selection is replaced only after the whole
/// chain succeeded.
pub fn externalize_selection<E, P>(
    files: &[PathBuf],
    editor: &mut E,
    prompt: &mut P,
) -> Result<ExternalizeOutcome, ResxError>
where
    E: EditorSurface,
    P: ResourcePrompt,
{
    let selection = editor.selected_text();
    if selection.is_empty() {
        return Ok(ExternalizeOutcome::NoSelection);
    }

    // Reuse an existing entry when some file already holds this value.
    if let Some((file, entry)) = find_first_matching_value_in(files, &selection) {
        let seed = PromptSeed {
            files,
            suggested_key: Some(&entry.name),
            preselected_file: Some(&file),
        };
        if prompt.choose(seed).is_none() {
            return Ok(ExternalizeOutcome::Cancelled);
        }
        return Ok(replace_with_reference(editor, file, entry.name, true));
    }

    let Some(choice) = prompt.choose(PromptSeed {
        files,
        suggested_key: None,
        preselected_file: None,
    }) else {
        return Ok(ExternalizeOutcome::Cancelled);
    };

    if store::find_by_key(&choice.file, &choice.key)?.is_some() {
        return Ok(ExternalizeOutcome::DuplicateKey {
            file: choice.file,
            key: choice.key,
        });
    }

    if !store::add(&choice.file, &choice.key, &selection, false)? {
        // The key was checked above, so a false return means the entry
        // landed but the designer did not regenerate.
        return Ok(ExternalizeOutcome::RegenerationFailed {
            file: choice.file,
            key: choice.key,
        });
    }

    Ok(replace_with_reference(editor, choice.file, choice.key, false))
}

fn replace_with_reference<E: EditorSurface>(
    editor: &mut E,
    file: PathBuf,
    key: String,
    reused: bool,
) -> ExternalizeOutcome {
    let class_name = get_class_name(&file);
    if class_name.is_empty() {
        return ExternalizeOutcome::AccessorMissing { file, key };
    }

    editor.replace_selection(&format!("{}.{}", class_name, key));
    ExternalizeOutcome::Replaced { file, key, reused }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer::designer_path;
    use std::fs;
    use tempfile::tempdir;

    const RESX: &str = r#"<root>
  <data name="Greeting"><value>Hello</value></data>
</root>"#;

    const DESIGNER: &str = "namespace MyApp.Properties {\n    internal class Resources {\n    }\n}\n";

    struct FakeEditor {
        selection: String,
        buffer: String,
    }

    impl FakeEditor {
        fn selecting(text: &str) -> Self {
            Self {
                selection: text.to_string(),
                buffer: String::new(),
            }
        }
    }

    impl EditorSurface for FakeEditor {
        fn selected_text(&self) -> String {
            self.selection.clone()
        }

        fn replace_selection(&mut self, text: &str) {
            self.buffer = text.to_string();
        }
    }

    /// Prompt that accepts with a scripted choice, recording the seed
    struct FakePrompt {
        answer: Option<PromptChoice>,
        seen_suggestion: Option<String>,
    }

    impl FakePrompt {
        fn accepting(file: &Path, key: &str) -> Self {
            Self {
                answer: Some(PromptChoice {
                    file: file.to_path_buf(),
                    key: key.to_string(),
                }),
                seen_suggestion: None,
            }
        }

        fn cancelling() -> Self {
            Self {
                answer: None,
                seen_suggestion: None,
            }
        }
    }

    impl ResourcePrompt for FakePrompt {
        fn choose(&mut self, seed: PromptSeed<'_>) -> Option<PromptChoice> {
            self.seen_suggestion = seed.suggested_key.map(|s| s.to_string());
            self.answer.clone()
        }
    }

    fn setup() -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let resx = dir.path().join("Resources.resx");
        fs::write(&resx, RESX).unwrap();
        fs::write(designer_path(&resx), DESIGNER).unwrap();
        (dir, resx)
    }

    #[test]
    fn test_empty_selection() {
        let (_dir, resx) = setup();
        let mut editor = FakeEditor::selecting("");
        let mut prompt = FakePrompt::cancelling();

        let outcome =
            externalize_selection(&[resx], &mut editor, &mut prompt).unwrap();
        assert_eq!(outcome, ExternalizeOutcome::NoSelection);
    }

    #[test]
    fn test_reuses_existing_entry() {
        let (_dir, resx) = setup();
        let mut editor = FakeEditor::selecting("Hello");
        let mut prompt = FakePrompt::accepting(&resx, "WhateverWasTyped");

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();

        assert_eq!(
            outcome,
            ExternalizeOutcome::Replaced {
                file: resx.clone(),
                key: "Greeting".to_string(),
                reused: true,
            }
        );
        assert_eq!(editor.buffer, "MyApp.Properties.Resources.Greeting");
        assert_eq!(prompt.seen_suggestion.as_deref(), Some("Greeting"));
        // Nothing was written
        assert_eq!(fs::read_to_string(&resx).unwrap(), RESX);
    }

    #[test]
    fn test_adds_new_entry_and_replaces() {
        let (_dir, resx) = setup();
        let mut editor = FakeEditor::selecting("Goodbye");
        let mut prompt = FakePrompt::accepting(&resx, "Farewell");

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();

        assert_eq!(
            outcome,
            ExternalizeOutcome::Replaced {
                file: resx.clone(),
                key: "Farewell".to_string(),
                reused: false,
            }
        );
        assert_eq!(editor.buffer, "MyApp.Properties.Resources.Farewell");

        let entry = store::find_by_key(&resx, "Farewell").unwrap().unwrap();
        assert_eq!(entry.value, "Goodbye");

        let generated = fs::read_to_string(designer_path(&resx)).unwrap();
        assert!(generated.contains("internal static string Farewell"));
    }

    #[test]
    fn test_duplicate_key_leaves_file_untouched() {
        let (_dir, resx) = setup();
        let mut editor = FakeEditor::selecting("Something new");
        let mut prompt = FakePrompt::accepting(&resx, "Greeting");

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();

        assert_eq!(
            outcome,
            ExternalizeOutcome::DuplicateKey {
                file: resx.clone(),
                key: "Greeting".to_string(),
            }
        );
        assert!(editor.buffer.is_empty());
        assert_eq!(fs::read_to_string(&resx).unwrap(), RESX);
    }

    #[test]
    fn test_cancel() {
        let (_dir, resx) = setup();
        let mut editor = FakeEditor::selecting("Goodbye");
        let mut prompt = FakePrompt::cancelling();

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();
        assert_eq!(outcome, ExternalizeOutcome::Cancelled);
        assert_eq!(fs::read_to_string(&resx).unwrap(), RESX);
    }

    #[test]
    fn test_regeneration_failure_leaves_selection() {
        let dir = tempdir().unwrap();
        let resx = dir.path().join("Resources.resx");
        fs::write(&resx, RESX).unwrap();
        // No designer: the add lands but regeneration cannot succeed.

        let mut editor = FakeEditor::selecting("Goodbye");
        let mut prompt = FakePrompt::accepting(&resx, "Farewell");

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();

        assert_eq!(
            outcome,
            ExternalizeOutcome::RegenerationFailed {
                file: resx.clone(),
                key: "Farewell".to_string(),
            }
        );
        assert!(editor.buffer.is_empty());
        // The resource file still took the entry
        assert!(store::find_by_key(&resx, "Farewell").unwrap().is_some());
    }

    #[test]
    fn test_reuse_without_designer_reports_missing_accessor() {
        let dir = tempdir().unwrap();
        let resx = dir.path().join("Resources.resx");
        fs::write(&resx, RESX).unwrap();

        let mut editor = FakeEditor::selecting("Hello");
        let mut prompt = FakePrompt::accepting(&resx, "Greeting");

        let outcome =
            externalize_selection(&[resx.clone()], &mut editor, &mut prompt).unwrap();

        assert_eq!(
            outcome,
            ExternalizeOutcome::AccessorMissing {
                file: resx,
                key: "Greeting".to_string(),
            }
        );
        assert!(editor.buffer.is_empty());
    }

    #[test]
    fn test_match_in_earliest_file_wins() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("First.resx");
        let second = dir.path().join("Second.resx");
        fs::write(&first, RESX).unwrap();
        fs::write(
            &second,
            r#"<root><data name="AlsoGreeting"><value>Hello</value></data></root>"#,
        )
        .unwrap();
        fs::write(designer_path(&first), DESIGNER).unwrap();

        let mut editor = FakeEditor::selecting("Hello");
        let mut prompt = FakePrompt::accepting(&first, "x");

        let outcome = externalize_selection(
            &[first.clone(), second],
            &mut editor,
            &mut prompt,
        )
        .unwrap();

        assert!(matches!(
            outcome,
            ExternalizeOutcome::Replaced { file, key, reused: true } if file == first && key == "Greeting"
        ));
    }
}
