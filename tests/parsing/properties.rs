#[cfg(test)]
mod verify {
    use docket::language::*;
    use docket::parsing::parse;

    fn properties(text: &str) -> Vec<Property> {
        let document = parse(text);
        document
            .instructions()
            .into_iter()
            .flat_map(|instruction| instruction.properties())
            .collect()
    }

    #[test]
    fn arg_with_and_without_values() {
        let properties = properties("ARG a=1 b c=\n");

        assert_eq!(properties.len(), 3);
        assert_eq!(properties[0].name, "a");
        assert_eq!(properties[0].value, Some("1".to_string()));
        assert_eq!(properties[1].name, "b");
        assert_eq!(properties[1].value, None);
        assert_eq!(properties[2].value, Some(String::new()));
    }

    #[test]
    fn env_legacy_form() {
        let properties = properties("ENV greeting hello  big world\n");

        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].name, "greeting");
        assert_eq!(properties[0].value, Some("hello  big world".to_string()));
        assert_eq!(
            properties[0].value_range,
            Some(Range::new(Position::new(0, 13), Position::new(0, 29)))
        );
    }

    #[test]
    fn env_quoted_values() {
        let properties = properties("ENV a=\"b c\" d='e f' g=h\\ i\n");

        let pairs: Vec<(String, Option<String>)> = properties
            .into_iter()
            .map(|property| (property.name, property.value))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), Some("b c".to_string())),
                ("d".to_string(), Some("e f".to_string())),
                ("g".to_string(), Some("h i".to_string())),
            ]
        );
    }

    #[test]
    fn label_continued_across_lines() {
        let properties = properties("LABEL one=1 \\\n  # note\n  two=\"2\"\n");

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[1].name, "two");
        assert_eq!(properties[1].value, Some("2".to_string()));
        assert_eq!(properties[1].raw_value, Some("\"2\"".to_string()));
        assert_eq!(
            properties[1].range,
            Range::new(Position::new(2, 2), Position::new(2, 9))
        );
    }

    #[test]
    fn other_keywords_have_no_properties() {
        assert!(properties("RUN a=b\nWORKDIR x=y\n").is_empty());
    }

    #[test]
    fn escaped_dollar_in_value() {
        let properties = properties("ENV price=\\$5\n");

        assert_eq!(properties[0].value, Some("$5".to_string()));
    }

    #[test]
    fn escaped_blank_before_hash_keeps_value() {
        let properties = properties("FROM a\nENV a=b\\ #c\n");

        assert_eq!(properties.len(), 1);
        assert_eq!(properties[0].value, Some("b #c".to_string()));
    }
}
