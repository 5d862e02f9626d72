#[cfg(test)]
mod verify {
    use docket::language::*;
    use docket::parsing::parse;

    const STAGED: &str = "ARG v=1\nFROM a\nARG v\nRUN echo $v\nFROM b\nARG v=2\nRUN echo $v";

    #[test]
    fn stage_scoping() {
        let document = parse(STAGED);

        assert_eq!(document.resolve_variable("v", 3), Resolution::Value("1".to_string()));
        assert_eq!(document.resolve_variable("v", 6), Resolution::Value("2".to_string()));
    }

    #[test]
    fn initial_declarations_are_not_inherited() {
        let document = parse("ARG v=1\nFROM a\nRUN echo $v\n");

        assert_eq!(document.resolve_variable("v", 1), Resolution::Value("1".to_string()));
        assert_eq!(document.resolve_variable("v", 2), Resolution::Undeclared);
        assert_eq!(document.is_build_variable("v", 1), Tristate::Yes);
        assert_eq!(document.is_build_variable("v", 2), Tristate::Unknown);
    }

    #[test]
    fn undeclared_versus_valueless() {
        let document = parse("FROM a\nARG empty\nRUN echo $empty $missing\n");

        assert_eq!(document.resolve_variable("missing", 2), Resolution::Undeclared);
        assert_eq!(document.resolve_variable("empty", 2), Resolution::Valueless);
        assert!(document
            .resolve_variable("empty", 2)
            .value()
            .is_none());
    }

    #[test]
    fn declarations_are_visible_only_afterwards() {
        let document = parse("FROM a\nRUN echo $v\nARG v=1\nRUN echo $v\n");

        assert_eq!(document.resolve_variable("v", 1), Resolution::Undeclared);
        assert_eq!(document.resolve_variable("v", 2), Resolution::Undeclared);
        assert_eq!(document.resolve_variable("v", 3), Resolution::Value("1".to_string()));
    }

    #[test]
    fn from_line_sees_only_initial_arguments() {
        let document = parse("FROM a\nENV base=b\nFROM $base\n");

        assert_eq!(document.resolve_variable("base", 2), Resolution::Undeclared);
        assert_eq!(document.is_build_variable("base", 2), Tristate::Unknown);
    }

    #[test]
    fn environment_wins_over_argument_classification() {
        let document = parse("FROM a\nARG x=1\nENV x=2\nARG y\nRUN echo $x $y $z\n");

        assert_eq!(document.is_build_variable("x", 4), Tristate::No);
        assert_eq!(document.is_build_variable("y", 4), Tristate::Yes);
        assert_eq!(document.is_build_variable("z", 4), Tristate::Unknown);
    }

    #[test]
    fn variables_carry_resolution() {
        let document = parse(STAGED);
        let instructions = document.instructions();
        let run = instructions[3];

        let variables = run.variables(&document);
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].name, "v");
        assert_eq!(variables[0].defined, Tristate::Yes);
        assert_eq!(variables[0].build_variable, Tristate::Yes);
        assert_eq!(
            variables[0].name_range,
            Range::new(Position::new(3, 10), Position::new(3, 11))
        );
    }

    #[test]
    fn braced_references_with_modifiers() {
        let document = parse("FROM a\nARG tag\nWORKDIR ${tag:-latest}/${other:+x}\n");
        let instructions = document.instructions();
        let variables = instructions[2].variables(&document);

        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].name, "tag");
        assert_eq!(variables[0].modifier, Some(Modifier::Operator('-')));
        assert_eq!(variables[0].substitution_parameter, Some("latest".to_string()));
        assert_eq!(variables[0].defined, Tristate::Yes);
        assert_eq!(variables[1].name, "other");
        assert_eq!(variables[1].defined, Tristate::No);
        assert_eq!(variables[1].build_variable, Tristate::Unknown);
    }

    #[test]
    fn escaped_dollar_is_not_a_reference() {
        let document = parse("FROM a\nRUN echo \\$HOME $USER\n");
        let instructions = document.instructions();
        let variables = instructions[1].variables(&document);

        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].name, "USER");
    }

    #[test]
    fn available_variables_per_stage() {
        let document = parse("ARG one\nARG two=2\nFROM a\nARG three\nENV four=4\nRUN x\nFROM b\nRUN y\n");

        assert_eq!(document.available_variables(2), vec!["two", "one"]);
        assert_eq!(document.available_variables(5), vec!["four", "three"]);
        assert!(document
            .available_variables(7)
            .is_empty());

        let stages = document.stages();
        assert_eq!(stages[0].available_variables(5), vec!["four", "three"]);
        assert!(stages[1]
            .available_variables(5)
            .is_empty());
    }

    #[test]
    fn containing_image() {
        let document = parse("ARG v\nFROM a\nRUN x\nFROM b AS c\n");

        let image = document
            .containing_image(Position::new(0, 2))
            .expect("inside the document");
        assert!(image.is_document());

        let image = document
            .containing_image(Position::new(2, 0))
            .expect("inside the first stage");
        assert!(!image.is_document());
        assert_eq!(
            image
                .instructions()
                .len(),
            2
        );

        let image = document
            .containing_image(Position::new(3, 5))
            .expect("inside the second stage");
        assert_eq!(image.stage_name(), Some("c".to_string()));

        assert!(document
            .containing_image(Position::new(2, 6))
            .is_none());
        assert!(document
            .containing_image(Position::new(9, 0))
            .is_none());
    }

    #[test]
    fn containing_image_of_empty_document() {
        let document = parse("");

        assert!(document
            .containing_image(Position::new(0, 0))
            .map(|image| image.is_document())
            .unwrap_or(false));
        assert!(document
            .containing_image(Position::new(0, 1))
            .is_none());
        assert!(document
            .containing_image(Position::new(1, 0))
            .is_none());
    }

    #[test]
    fn initial_declarations() {
        let document = parse("ARG a=1 b\n# comment\nARG c\nFROM x\nARG d\n");
        let names: Vec<String> = document
            .initial_declarations()
            .into_iter()
            .map(|property| property.name)
            .collect();

        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(
            document
                .initial_instructions()
                .len(),
            2
        );
    }

    #[test]
    fn escaped_escape_before_reference() {
        let document = parse("FROM a\nARG HOME=/root\nWORKDIR \\\\$HOME\n");
        let instructions = document.instructions();
        let workdir = instructions[2];

        assert_eq!(workdir.arguments()[0].value(), "\\$HOME");

        let variables = workdir.variables(&document);
        assert_eq!(variables.len(), 1);
        assert_eq!(variables[0].name, "HOME");
        assert_eq!(variables[0].defined, Tristate::Yes);
        assert_eq!(
            variables[0].name_range,
            Range::new(Position::new(2, 11), Position::new(2, 15))
        );
    }
}
