//! The stage-introducing FROM instruction, and the splitting of its base
//! image reference into registry, name, tag, and digest.

use super::argument::Argument;
use super::flag::Flag;
use super::instruction::Instruction;
use super::position::Range;

/// A view of a FROM instruction exposing the pieces of `FROM [--flags]
/// image [AS name]`.
#[derive(Debug, Clone, Copy)]
pub struct FromInstruction<'a, 'i> {
    instruction: &'a Instruction<'i>,
}

impl<'a, 'i> FromInstruction<'a, 'i> {
    pub(crate) fn new(instruction: &'a Instruction<'i>) -> FromInstruction<'a, 'i> {
        FromInstruction { instruction }
    }

    pub fn instruction(&self) -> &'a Instruction<'i> {
        self.instruction
    }

    /// Arguments following any leading flags.
    fn positional(&self) -> Vec<Argument<'i>> {
        self.instruction
            .arguments()
            .into_iter()
            .skip_while(|argument| Flag::is_flag(argument))
            .collect()
    }

    pub fn image_argument(&self) -> Option<Argument<'i>> {
        self.positional()
            .into_iter()
            .next()
    }

    pub fn image(&self) -> Option<String> {
        self.image_argument()
            .map(|argument| {
                argument
                    .value()
                    .to_string()
            })
    }

    pub fn image_range(&self) -> Option<Range> {
        self.image_argument()
            .map(|argument| argument.range())
    }

    pub fn reference(&self) -> Option<ImageReference> {
        ImageReference::split(&self.image_argument()?)
    }

    pub fn image_name(&self) -> Option<String> {
        self.reference()
            .map(|reference| reference.name.text)
    }

    pub fn image_name_range(&self) -> Option<Range> {
        self.reference()
            .map(|reference| reference.name.range)
    }

    pub fn image_tag(&self) -> Option<String> {
        self.reference()?
            .tag
            .map(|tag| tag.text)
    }

    pub fn image_tag_range(&self) -> Option<Range> {
        self.reference()?
            .tag
            .map(|tag| tag.range)
    }

    pub fn image_digest(&self) -> Option<String> {
        self.reference()?
            .digest
            .map(|digest| digest.text)
    }

    pub fn image_digest_range(&self) -> Option<Range> {
        self.reference()?
            .digest
            .map(|digest| digest.range)
    }

    pub fn registry(&self) -> Option<String> {
        self.reference()?
            .registry
            .map(|registry| registry.text)
    }

    pub fn registry_range(&self) -> Option<Range> {
        self.reference()?
            .registry
            .map(|registry| registry.range)
    }

    fn alias(&self) -> Option<Argument<'i>> {
        let positional = self.positional();
        match positional.get(1) {
            Some(keyword)
                if keyword
                    .value()
                    .eq_ignore_ascii_case("as") =>
            {
                positional
                    .into_iter()
                    .nth(2)
            }
            _ => None,
        }
    }

    /// The name given to this stage with `AS`, if any.
    pub fn stage_name(&self) -> Option<String> {
        self.alias()
            .map(|argument| {
                argument
                    .value()
                    .to_string()
            })
    }

    pub fn stage_name_range(&self) -> Option<Range> {
        self.alias()
            .map(|argument| argument.range())
    }

    pub fn platform_flag(&self) -> Option<Flag> {
        self.instruction
            .flags()
            .into_iter()
            .find(|flag| flag.name == "platform")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub text: String,
    pub range: Range,
}

/// An image reference of the form `[registry/]name[:tag][@digest]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: Option<Component>,
    pub name: Component,
    pub tag: Option<Component>,
    pub digest: Option<Component>,
}

impl ImageReference {
    /// Split an image argument into its components. Separators inside a
    /// `${...}` reference are not structural. Returns None for an empty
    /// argument.
    pub fn split(argument: &Argument<'_>) -> Option<ImageReference> {
        let chars: Vec<char> = argument
            .value()
            .chars()
            .collect();
        if chars.is_empty() {
            return None;
        }

        let structural = structural_map(&chars);
        let find = |c: char, from: usize, to: usize| {
            (from..to).find(|&i| structural[i] && chars[i] == c)
        };
        let rfind = |c: char, from: usize, to: usize| {
            (from..to)
                .rev()
                .find(|&i| structural[i] && chars[i] == c)
        };

        let component = |start: usize, end: usize| Component {
            text: chars[start..end]
                .iter()
                .collect(),
            range: argument.sub_range(start, end),
        };

        let (end, digest) = match find('@', 0, chars.len()) {
            Some(at) => (at, Some(component(at + 1, chars.len()))),
            None => (chars.len(), None),
        };

        let mut start = 0;
        let mut registry = None;
        if let Some(slash) = find('/', 0, end) {
            let first: String = chars[..slash]
                .iter()
                .collect();
            if find('.', 0, slash).is_some()
                || find(':', 0, slash).is_some()
                || first == "localhost"
            {
                registry = Some(component(0, slash));
                start = slash + 1;
            }
        }

        let last_slash = rfind('/', start, end)
            .map(|i| i + 1)
            .unwrap_or(start);
        let (finish, tag) = match rfind(':', last_slash, end) {
            Some(colon) => (colon, Some(component(colon + 1, end))),
            None => (end, None),
        };

        Some(ImageReference {
            registry,
            name: component(start, finish),
            tag,
            digest,
        })
    }
}

/// For each character, whether it sits outside any `${...}` reference.
fn structural_map(chars: &[char]) -> Vec<bool> {
    let mut map = vec![true; chars.len()];
    let mut depth = 0usize;
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '$' && chars.get(i + 1) == Some(&'{') {
            map[i] = false;
            map[i + 1] = false;
            depth += 1;
            i += 2;
            continue;
        }
        if depth > 0 {
            map[i] = false;
            if chars[i] == '}' {
                depth -= 1;
            }
        }
        i += 1;
    }

    map
}
