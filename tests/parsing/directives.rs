#[cfg(test)]
mod verify {
    use docket::language::*;
    use docket::parsing::parse;

    #[test]
    fn escape_directive_backtick() {
        let document = parse("# escape=`\nRUN a `\n  b");

        assert_eq!(document.escape_character(), '`');
        assert_eq!(
            document
                .directive()
                .map(|directive| directive.kind),
            Some(Some(DirectiveKind::Escape))
        );

        let instructions = document.instructions();
        assert_eq!(instructions.len(), 1);

        let values: Vec<String> = instructions[0]
            .arguments()
            .iter()
            .map(|argument| {
                argument
                    .value()
                    .to_string()
            })
            .collect();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn backslash_is_literal_under_backtick() {
        let document = parse("# escape=`\nCOPY C:\\src C:\\dst\n");
        let instructions = document.instructions();
        let arguments = instructions[0].arguments();

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].value(), "C:\\src");
    }

    #[test]
    fn directive_exclusivity() {
        let document = parse("# comment\n# escape=`\nRUN a `\nRUN b\n");

        assert!(document
            .directive()
            .is_none());
        assert_eq!(document.escape_character(), '\\');
        assert_eq!(
            document
                .comments()
                .len(),
            2
        );
        assert_eq!(
            document
                .instructions()
                .len(),
            2
        );
    }

    #[test]
    fn directive_name_and_value_ranges() {
        let document = parse("#  syntax =  docker/dockerfile:1  \nFROM a\n");
        let directive = document
            .directive()
            .expect("a directive");

        assert_eq!(directive.kind, Some(DirectiveKind::Syntax));
        assert_eq!(directive.name, "syntax");
        assert_eq!(
            directive.name_range,
            Range::new(Position::new(0, 3), Position::new(0, 9))
        );
        assert_eq!(directive.value, "docker/dockerfile:1");
        assert_eq!(
            directive.value_range,
            Range::new(Position::new(0, 13), Position::new(0, 32))
        );
        assert!(matches!(document.lines()[0], Line::Directive(_)));
    }

    #[test]
    fn unknown_directive_names_are_kept() {
        let document = parse("# foo=bar\nFROM a\n");
        let directive = document
            .directive()
            .expect("a directive");

        assert_eq!(directive.name, "foo");
        assert_eq!(directive.kind, None);
    }

    #[test]
    fn comment_without_equals_is_not_a_directive() {
        let document = parse("  # just a comment\nFROM a\n");

        assert!(document
            .directive()
            .is_none());
        assert_eq!(
            document.comments()[0].range,
            Range::new(Position::new(0, 2), Position::new(0, 18))
        );
    }
}
