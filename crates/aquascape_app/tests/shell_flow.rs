use aquascape_app::{FormError, FormField, Route, RouteError, Shell, ShellError, ShellOutcome};

fn output(shell: &mut Shell, line: &str) -> String {
    match shell.execute(line).unwrap() {
        ShellOutcome::Output(text) => text,
        ShellOutcome::Quit => panic!("unexpected quit for `{line}`"),
    }
}

#[test]
fn form_flow_adds_tank_and_rerenders_list() {
    let mut shell = Shell::new();
    shell.render();
    output(&mut shell, "goto /tanks");
    let page = shell.render_if_stale().expect("navigation should re-render");
    assert!(page.contains("No tanks yet"));

    output(&mut shell, r#"set name "Main Tank""#);
    output(&mut shell, "set size 60");
    output(&mut shell, "set filter Canister");
    assert!(shell.render_if_stale().is_none());

    let added = output(&mut shell, "submit");
    assert!(added.starts_with("Tank added: "));
    assert_eq!(shell.form().value(FormField::Name), "");

    let page = shell.render_if_stale().expect("store change should re-render");
    assert!(page.contains("#1 Main Tank"));
    assert!(page.contains("Size: 60L"));
    assert!(page.contains("CO₂: No"));
}

#[test]
fn add_update_delete_by_position() {
    let mut shell = Shell::new();
    output(
        &mut shell,
        r#"add name="Main Tank" size=60 filter=Canister lighting=8 co2=off"#,
    );
    output(
        &mut shell,
        r#"add name="Shrimp Cube" size=20 filter=Sponge co2=on"#,
    );
    assert_eq!(shell.store().len(), 2);

    let first_id = shell.store().tanks()[0].id;
    let second = shell.store().tanks()[1].clone();
    assert_ne!(first_id, second.id);

    let updated = output(&mut shell, "update #1 size=100");
    assert!(updated.starts_with("Tank updated"));
    let first = shell.store().get_by_id(first_id).unwrap();
    assert_eq!(first.size_liters, 100.0);
    assert_eq!(first.name, "Main Tank");

    let deleted = output(&mut shell, &format!("delete {first_id}"));
    assert!(deleted.starts_with("Tank deleted"));
    assert_eq!(shell.store().tanks(), &[second]);

    let again = output(&mut shell, &format!("delete {first_id}"));
    assert!(again.starts_with("No tank with id"));
    assert_eq!(shell.store().len(), 1);
}

#[test]
fn show_prints_tank_json() {
    let mut shell = Shell::new();
    output(
        &mut shell,
        r#"add name="Nano" size=12.5 filter=HOB lighting=6"#,
    );
    let json: serde_json::Value = serde_json::from_str(&output(&mut shell, "show #1")).unwrap();
    assert_eq!(json["name"], "Nano");
    assert_eq!(json["size_liters"], 12.5);
    assert_eq!(json["lighting_hours"], 6.0);
}

#[test]
fn invalid_input_surfaces_errors_without_changes() {
    let mut shell = Shell::new();

    let err = shell
        .execute(r#"add name="Too bright" size=40 filter=HOB lighting=30"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ShellError::Form(FormError::OutOfRange {
            field: FormField::LightingHours,
            ..
        })
    ));

    let err = shell.execute("goto /maintenance").unwrap_err();
    assert!(matches!(err, ShellError::Route(RouteError::NotFound(_))));
    assert_eq!(shell.route(), Route::Home);

    let err = shell.execute("delete #3").unwrap_err();
    assert!(matches!(err, ShellError::InvalidId(_)));

    let err = shell.execute("frobnicate").unwrap_err();
    assert!(matches!(err, ShellError::UnknownCommand(_)));

    assert!(shell.store().is_empty());
}

#[test]
fn quit_and_blank_lines() {
    let mut shell = Shell::new();
    assert_eq!(shell.execute("   ").unwrap(), ShellOutcome::Output(String::new()));
    assert_eq!(shell.execute("quit").unwrap(), ShellOutcome::Quit);
}

#[test]
fn set_keeps_equals_signs_in_values() {
    let mut shell = Shell::new();
    let echoed = output(&mut shell, "set name Reef=Big tank");
    assert_eq!(echoed, "name = Reef=Big tank");
    assert_eq!(shell.form().value(FormField::Name), "Reef=Big tank");

    output(&mut shell, r#"set filter "HOB v2""#);
    assert_eq!(shell.form().value(FormField::FilterType), "HOB v2");
}
