#[cfg(test)]
mod verify {
    use docket::language::*;
    use docket::parsing::parse;

    #[test]
    fn round_trip_simple_recipe() {
        let text = "FROM alpine\nRUN echo hi\n";
        let document = parse(text);

        let rendered: Vec<String> = document
            .instructions()
            .iter()
            .map(|instruction| instruction.to_string())
            .collect();
        assert_eq!(rendered, vec!["FROM alpine", "RUN echo hi"]);
    }

    #[test]
    fn continuation_with_embedded_comment() {
        let text = "RUN a \\\n# note\nb";
        let document = parse(text);

        let instructions = document.instructions();
        assert_eq!(instructions.len(), 1);

        let instruction = instructions[0];
        let values: Vec<String> = instruction
            .arguments()
            .iter()
            .map(|argument| {
                argument
                    .value()
                    .to_string()
            })
            .collect();
        assert_eq!(values, vec!["a", "b"]);
        assert_eq!(instruction.argument_content(), "a b");

        let comments = instruction.comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(
            comments[0].range,
            Range::new(Position::new(1, 0), Position::new(1, 6))
        );
        assert_eq!(comments[0].content(text), "note");
        assert_eq!(
            instruction.range(),
            Range::new(Position::new(0, 0), Position::new(2, 1))
        );
    }

    #[test]
    fn argument_joined_across_continuation() {
        let document = parse("RUN ab\\\ncd ef\n");
        let instruction = document.instructions()[0];
        let arguments = instruction.arguments();

        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].value(), "abcd");
        assert_eq!(
            arguments[0].range(),
            Range::new(Position::new(0, 4), Position::new(1, 2))
        );
        assert_eq!(arguments[1].value(), "ef");
    }

    #[test]
    fn ranges_are_nested() {
        let text = "FROM --platform=linux/amd64 node:20 AS build\n\
                    ENV PATH=/usr/local/bin:$PATH \\\n  HOME=/root\n\
                    COPY --from=build --chown=1000:1000 /src /dst\n";
        let document = parse(text);

        for instruction in document.instructions() {
            let range = instruction.range();
            assert!(range.contains_range(&instruction.keyword_range()));

            for argument in instruction.arguments() {
                assert!(range.contains_range(&argument.range()));
            }
            for flag in instruction.flags() {
                assert!(range.contains_range(&flag.range));
                assert!(flag
                    .range
                    .contains_range(&flag.name_range));
            }
            for property in instruction.properties() {
                assert!(range.contains_range(&property.range));
                assert!(property
                    .range
                    .contains_range(&property.name_range));
                if let Some(value_range) = property.value_range {
                    assert!(property
                        .range
                        .contains_range(&value_range));
                }
            }
            for variable in instruction.variables(&document) {
                assert!(range.contains_range(&variable.range));
                assert!(variable
                    .range
                    .contains_range(&variable.name_range));
            }
        }
    }

    #[test]
    fn derived_views_are_repeatable() {
        let document = parse("ARG v=1\nFROM a:$v\nENV x=\"y z\" \\\n  w=${v:-2}\n");

        for instruction in document.instructions() {
            assert_eq!(instruction.arguments(), instruction.arguments());
            assert_eq!(instruction.properties(), instruction.properties());
            assert_eq!(instruction.flags(), instruction.flags());
            assert_eq!(instruction.variables(&document), instruction.variables(&document));
            assert_eq!(instruction.argument_content(), instruction.argument_content());
        }
    }

    #[test]
    fn flags_and_options() {
        let document = parse(
            "RUN --mount=type=cache,target=/root/.cache --network=none pip install x\n",
        );
        let instruction = document.instructions()[0];
        let flags = instruction.flags();

        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].name, "mount");
        assert_eq!(
            flags[0]
                .option("target")
                .and_then(|option| option
                    .value
                    .clone()),
            Some("/root/.cache".to_string())
        );
        assert_eq!(
            flags[0]
                .options()
                .len(),
            2
        );
        assert_eq!(flags[1].name, "network");
        assert_eq!(flags[1].value, Some("none".to_string()));
    }

    #[test]
    fn flags_only_where_supported() {
        let document = parse("WORKDIR --x=y /app\n");

        assert!(document.instructions()[0]
            .flags()
            .is_empty());
    }

    #[test]
    fn from_reference_components() {
        let document = parse(
            "FROM --platform=$BUILDPLATFORM registry.example.com:5000/group/name:tag AS base\n",
        );
        let instruction = document.instructions()[0];
        let from = instruction
            .from()
            .expect("a FROM instruction");

        assert_eq!(
            from.image(),
            Some("registry.example.com:5000/group/name:tag".to_string())
        );
        assert_eq!(from.registry(), Some("registry.example.com:5000".to_string()));
        assert_eq!(from.image_name(), Some("group/name".to_string()));
        assert_eq!(from.image_tag(), Some("tag".to_string()));
        assert_eq!(from.image_digest(), None);
        assert_eq!(from.stage_name(), Some("base".to_string()));
        assert_eq!(
            from.stage_name_range(),
            Some(Range::new(Position::new(0, 75), Position::new(0, 79)))
        );
        assert_eq!(
            from.platform_flag()
                .and_then(|flag| flag.value),
            Some("$BUILDPLATFORM".to_string())
        );
    }

    #[test]
    fn from_digest() {
        let digest = format!("sha256:{}", "0123456789abcdef".repeat(4));
        let source = format!("FROM name@{}\n", digest);
        let document = parse(&source);
        let instruction = document.instructions()[0];
        let from = instruction
            .from()
            .expect("a FROM instruction");

        assert_eq!(from.image_name(), Some("name".to_string()));
        assert_eq!(from.image_digest(), Some(digest));
        assert_eq!(from.image_tag(), None);
        assert_eq!(from.registry(), None);
        assert_eq!(from.stage_name(), None);
    }

    #[test]
    fn unknown_keywords_are_generic() {
        let document = parse("FOO bar baz\nfrom alpine\n");
        let instructions = document.instructions();

        assert_eq!(instructions[0].kind(), Keyword::Unknown);
        assert_eq!(instructions[0].keyword(), "FOO");
        assert_eq!(
            instructions[0]
                .arguments()
                .len(),
            2
        );
        assert!(instructions[1].is_stage());
    }

    #[test]
    fn positions_count_utf16() {
        let document = parse("LABEL note=\"𝄞\" x=y\n");
        let properties = document.instructions()[0].properties();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties[0].value, Some("𝄞".to_string()));
        assert_eq!(
            properties[1].name_range,
            Range::new(Position::new(0, 16), Position::new(0, 17))
        );
    }

    #[test]
    fn offsets_and_positions() {
        let document = parse("FROM a\r\nRUN b\n");

        assert_eq!(document.position_at(8), Position::new(1, 0));
        assert_eq!(document.offset_at(Position::new(1, 3)), Some(11));
        assert_eq!(document.offset_at(Position::new(0, 9)), None);
        assert_eq!(document.offset_at(Position::new(7, 0)), None);
    }
}
