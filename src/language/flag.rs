//! Option-style `--name=value` flags leading the arguments of ADD, COPY,
//! FROM, RUN, and HEALTHCHECK.

use super::argument::Argument;
use super::position::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub name: String,
    pub name_range: Range,
    pub value: Option<String>,
    pub value_range: Option<Range>,
    pub range: Range,
    options: Vec<FlagOption>,
}

/// One `key=value` pair of a compound flag value such as
/// `--mount=type=cache,target=/root/.cache`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOption {
    pub name: String,
    pub name_range: Range,
    pub value: Option<String>,
    pub value_range: Option<Range>,
    pub range: Range,
}

impl Flag {
    pub fn is_flag(argument: &Argument<'_>) -> bool {
        argument
            .value()
            .starts_with("--")
    }

    pub(crate) fn parse(argument: &Argument<'_>) -> Flag {
        let chars: Vec<char> = argument
            .value()
            .chars()
            .collect();
        let length = chars.len();

        let equals = chars
            .iter()
            .position(|c| *c == '=');
        let name_end = equals.unwrap_or(length);

        let name: String = chars[2.min(name_end)..name_end]
            .iter()
            .collect();
        let name_range = argument.sub_range(2.min(name_end), name_end);

        let (value, value_range, options) = match equals {
            Some(i) => {
                let value: String = chars[i + 1..]
                    .iter()
                    .collect();
                let options = if value.contains('=') {
                    split_options(argument, &chars, i + 1)
                } else {
                    Vec::new()
                };
                (Some(value), Some(argument.sub_range(i + 1, length)), options)
            }
            None => (None, None, Vec::new()),
        };

        Flag {
            name,
            name_range,
            value,
            value_range,
            range: argument.range(),
            options,
        }
    }

    pub fn options(&self) -> &[FlagOption] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&FlagOption> {
        self.options
            .iter()
            .find(|option| option.name == name)
    }
}

fn split_options(argument: &Argument<'_>, chars: &[char], from: usize) -> Vec<FlagOption> {
    let mut options = Vec::new();
    let mut start = from;

    for end in from..=chars.len() {
        if end < chars.len() && chars[end] != ',' {
            continue;
        }
        if end > start {
            let segment = &chars[start..end];
            let option = match segment
                .iter()
                .position(|c| *c == '=')
            {
                Some(i) => FlagOption {
                    name: segment[..i]
                        .iter()
                        .collect(),
                    name_range: argument.sub_range(start, start + i),
                    value: Some(
                        segment[i + 1..]
                            .iter()
                            .collect(),
                    ),
                    value_range: Some(argument.sub_range(start + i + 1, end)),
                    range: argument.sub_range(start, end),
                },
                None => FlagOption {
                    name: segment
                        .iter()
                        .collect(),
                    name_range: argument.sub_range(start, end),
                    value: None,
                    value_range: None,
                    range: argument.sub_range(start, end),
                },
            };
            options.push(option);
        }
        start = end + 1;
    }

    options
}
