use std::time::Duration;

use termprompt::{
    Choice, Console, DefaultSpec, FixedMode, MemoryOutput, PromptEngine, ScriptedAnswer,
    ScriptedInput, SelectPrompt, StaticTerminal, TextPrompt, YesNoPrompt,
};

fn engine(input: ScriptedInput, columns: usize) -> (PromptEngine, MemoryOutput) {
    let output = MemoryOutput::new();
    let console = Console::new(
        input,
        output.clone(),
        StaticTerminal::with_columns(columns),
        FixedMode::interactive(),
    );
    (PromptEngine::new(console), output)
}

#[test]
fn installer_style_session() {
    let input = ScriptedInput::lines(["", "2", "maybe", "n"]);
    let reads = input.read_count();
    let (mut engine, output) = engine(input, 80);

    let dir = engine
        .text(&TextPrompt::new("Install directory?").with_default("/opt/app"))
        .unwrap();
    assert_eq!(dir, "/opt/app");

    let choices = Choice::from_pairs(["Minimal", "min", "Full", "full"]).unwrap();
    let flavour = engine
        .select(&SelectPrompt::new("Flavour", choices).with_intro("Choose a flavour:"))
        .unwrap();
    assert_eq!(flavour, "full");

    let proceed = engine.yes_no(&YesNoPrompt::new("Proceed?")).unwrap();
    assert!(!proceed);

    assert_eq!(reads.get(), 4);
    let text = output.contents();
    assert!(text.starts_with("Install directory? [/opt/app] \n"));
    assert!(text.contains("(1)\tMinimal\n(2)\tFull\n"));
    assert!(text.contains("Proceed? [Y/n] Invalid choice\nProceed? [Y/n] "));
}

#[test]
fn parsed_default_spec_selects_by_value() {
    let choices = Choice::from_pairs(["Red", "r", "Green", "g", "Blue", "b"]).unwrap();
    let default = DefaultSpec::parse("value:b").unwrap();
    let (mut engine, output) = engine(ScriptedInput::lines([""]), 80);

    let picked = engine
        .select(&SelectPrompt::new("Colour", choices).with_default(default))
        .unwrap();
    assert_eq!(picked, "b");
    assert!(output.contents().ends_with("Colour [3] "));
}

#[test]
fn odd_pairing_is_reported_before_any_output() {
    let err = Choice::from_pairs(["A", "a", "B"]).unwrap_err();
    assert_eq!(err.code.as_str(), "prompt.invalid_choices");
}

#[test]
fn timeout_falls_back_to_default_for_every_prompt_kind() {
    let slow = || ScriptedAnswer::Delayed(Duration::from_secs(30), "ignored".to_string());
    let (mut engine, output) = engine(ScriptedInput::new([slow(), slow(), slow()]), 80);

    assert_eq!(
        engine
            .text(&TextPrompt::new("Name?").with_default("anon").with_timeout(1))
            .unwrap(),
        "anon"
    );
    assert!(!engine
        .yes_no(&YesNoPrompt::new("Go?").with_default(false).with_timeout(1))
        .unwrap());
    let choices = vec![Choice::new("A", 'a'), Choice::new("B", 'b')];
    assert_eq!(
        engine
            .select(
                &SelectPrompt::new("Pick", choices)
                    .with_default(DefaultSpec::Index(2))
                    .with_timeout(1)
            )
            .unwrap(),
        'b'
    );

    assert_eq!(
        output
            .contents()
            .matches("TIMEOUT: using default answer")
            .count(),
        3
    );
}

#[test]
fn closed_input_surfaces_as_error() {
    let (mut engine, _) = engine(ScriptedInput::default(), 80);
    let err = engine.text(&TextPrompt::new("Name?")).unwrap_err();
    assert_eq!(err.code.as_str(), "input.closed");
}

#[test]
fn long_prompt_is_wrapped_to_terminal_width() {
    let (mut engine, output) = engine(ScriptedInput::lines(["ok"]), 21);
    engine
        .text(&TextPrompt::new("please type the name of the release"))
        .unwrap();
    for line in output.contents().lines() {
        assert!(line.chars().count() <= 20, "{:?}", line);
    }
}
