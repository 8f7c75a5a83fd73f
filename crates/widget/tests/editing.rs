//! End-to-end editing sessions through the public widget API.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chipline_decoration::{ChipKind, KnownVariables, Mode, UpdateStrategy, Viewport};
use chipline_widget::{EditorConfig, EditorProps, Segment, TemplateEditor};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::TRACE).try_init();
}

fn vars() -> KnownVariables {
	[("userName", "User Name"), ("company", "Company"), ("age", "Age")].into_iter().collect()
}

fn labels(editor: &TemplateEditor) -> Vec<(String, ChipKind)> {
	editor.decorations().iter().map(|d| (d.identifier().to_string(), d.chip().kind())).collect()
}

#[rstest]
#[case::incremental(UpdateStrategy::Incremental)]
#[case::full(UpdateStrategy::Full)]
fn compose_a_greeting(#[case] strategy: UpdateStrategy) {
	init_tracing();
	let mut editor = TemplateEditor::new(EditorProps::new("").with_variables(vars()).with_strategy(strategy));
	let seen = Rc::new(RefCell::new(Vec::<String>::new()));
	let sink = Rc::clone(&seen);
	editor.on_change(move |text| sink.borrow_mut().push(text.to_string()));

	editor.insert_text("Dear /");
	assert!(editor.menu().is_visible());
	editor.accept_suggestion();
	editor.insert_text(", welcome to /");
	editor.menu_next();
	editor.accept_suggestion();
	editor.insert_text("! Age: <%= agee %>");

	assert_eq!(editor.text(), "Dear <%= userName %>, welcome to <%= company %>! Age: <%= agee %>");
	assert_eq!(
		labels(&editor),
		vec![
			("userName".to_string(), ChipKind::Known),
			("company".to_string(), ChipKind::Known),
			("agee".to_string(), ChipKind::Unknown),
		]
	);
	assert_eq!(seen.borrow().last().map(String::as_str), Some(editor.text().as_str()));
	assert_eq!(seen.borrow().len() as u64, editor.version());

	// fix the typo: backspace over the chip and retype it
	editor.delete_backward();
	editor.insert_text("<%= age %>");
	assert_eq!(labels(&editor).last(), Some(&("age".to_string(), ChipKind::Known)));
}

#[test]
fn far_edits_keep_chip_identity() {
	init_tracing();
	let mut editor = TemplateEditor::new(EditorProps::new("<%= userName %>\n\nbody").with_variables(vars()));
	let chip = Arc::clone(editor.decorations().as_slice()[0].chip());

	editor.set_cursor(21);
	editor.insert_text(" text");
	editor.set_cursor(16);
	editor.insert_text("more\n");

	assert_eq!(editor.decorations().len(), 1);
	assert!(Arc::ptr_eq(&chip, editor.decorations().as_slice()[0].chip()));
}

#[test]
fn mustache_mode_ignores_template_tokens() {
	init_tracing();
	let editor = TemplateEditor::new(EditorProps::new("<%= a %> {{b}}").with_mode(Mode::Variable));
	assert_eq!(labels(&editor), vec![("b".to_string(), ChipKind::Plain)]);
}

#[test]
fn scrolling_decorates_only_visible_lines() {
	init_tracing();
	let text: String = (0..50).map(|i| format!("line {i}: {{{{v{i}}}}}\n")).collect();
	let mut editor = TemplateEditor::new(EditorProps::new(text).with_mode(Mode::Variable));
	editor.set_viewport(Some(Viewport::new(10, 13)));
	let names: Vec<_> = editor.decorations().iter().map(|d| d.identifier().to_string()).collect();
	assert_eq!(names, vec!["v10", "v11", "v12"]);

	let chips = editor.segments().iter().filter(|s| matches!(s, Segment::Chip { .. })).count();
	assert_eq!(chips, 3);

	// deleting the first line scrolls v13 into view
	editor.replace_range(0, 15, "").unwrap();
	let names: Vec<_> = editor.decorations().iter().map(|d| d.identifier().to_string()).collect();
	assert_eq!(names, vec!["v11", "v12", "v13"]);
}

#[test]
fn configured_editor() {
	init_tracing();
	let config = EditorConfig::from_toml(
		r##"
mode = "variable"
strategy = "full"

[variables]
name = "Name"

[theme.known]
background = "#ffffff"
border = "#000000"
foreground = "#333333"
"##,
	)
	.unwrap();

	let editor = TemplateEditor::from_config("Hi {{name}}", &config).unwrap();
	let segments = editor.segments();
	let Some(Segment::Chip { view, .. }) = segments.last() else {
		panic!("expected a trailing chip");
	};
	assert_eq!(view.style.background, "#ffffff");
	assert_eq!(view.class, "chip-known");
}
