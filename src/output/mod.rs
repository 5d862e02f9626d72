//! Output generation for the docket CLI application

use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;

use docket::language::{
    Document, ImageScope, Instruction, Keyword, Range, Resolution, Tristate,
};

#[derive(Serialize)]
struct Outline {
    escape: char,
    directive: Option<DirectiveOutline>,
    initial: Vec<InstructionOutline>,
    stages: Vec<StageOutline>,
}

#[derive(Serialize)]
struct DirectiveOutline {
    name: String,
    value: String,
    range: Range,
}

#[derive(Serialize)]
struct StageOutline {
    name: Option<String>,
    image: Option<String>,
    registry: Option<String>,
    tag: Option<String>,
    digest: Option<String>,
    range: Option<Range>,
    instructions: Vec<InstructionOutline>,
}

#[derive(Serialize)]
struct InstructionOutline {
    keyword: Keyword,
    text: String,
    range: Range,
    arguments: Vec<String>,
    variables: Vec<VariableOutline>,
}

#[derive(Serialize)]
struct VariableOutline {
    name: String,
    range: Range,
    resolution: Resolution,
    build_variable: Tristate,
}

fn outline_instruction(document: &Document<'_>, instruction: &Instruction<'_>) -> InstructionOutline {
    InstructionOutline {
        keyword: instruction.kind(),
        text: instruction
            .keyword()
            .to_string(),
        range: instruction.range(),
        arguments: instruction
            .arguments()
            .iter()
            .map(|argument| {
                argument
                    .value()
                    .to_string()
            })
            .collect(),
        variables: instruction
            .variables(document)
            .into_iter()
            .map(|variable| VariableOutline {
                resolution: document.resolve_variable(
                    &variable.name,
                    variable
                        .range
                        .start
                        .line,
                ),
                name: variable.name,
                range: variable.range,
                build_variable: variable.build_variable,
            })
            .collect(),
    }
}

fn outline_stage(document: &Document<'_>, stage: &ImageScope<'_, '_>) -> StageOutline {
    let from = stage
        .from()
        .and_then(|instruction| instruction.from());
    let reference = from.and_then(|from| from.reference());

    StageOutline {
        name: stage.stage_name(),
        image: from.and_then(|from| from.image()),
        registry: reference
            .as_ref()
            .and_then(|reference| {
                reference
                    .registry
                    .as_ref()
                    .map(|c| c.text.clone())
            }),
        tag: reference
            .as_ref()
            .and_then(|reference| {
                reference
                    .tag
                    .as_ref()
                    .map(|c| c.text.clone())
            }),
        digest: reference
            .as_ref()
            .and_then(|reference| {
                reference
                    .digest
                    .as_ref()
                    .map(|c| c.text.clone())
            }),
        range: stage
            .from()
            .map(|instruction| instruction.range()),
        instructions: stage
            .instructions()
            .into_iter()
            .map(|instruction| outline_instruction(document, instruction))
            .collect(),
    }
}

fn outline(document: &Document<'_>) -> Outline {
    Outline {
        escape: document.escape_character(),
        directive: document
            .directive()
            .map(|directive| DirectiveOutline {
                name: directive
                    .name
                    .clone(),
                value: directive
                    .value
                    .clone(),
                range: directive.range,
            }),
        initial: document
            .initial_instructions()
            .into_iter()
            .map(|instruction| outline_instruction(document, instruction))
            .collect(),
        stages: document
            .stages()
            .iter()
            .map(|stage| outline_stage(document, stage))
            .collect(),
    }
}

/// Render the document's structure as JSON.
pub fn via_json(document: &Document<'_>) -> Result<String, serde_json::Error> {
    let outline = outline(document);
    debug!(stages = outline.stages.len(), "serializing outline");
    serde_json::to_string_pretty(&outline)
}

/// Render the document's structure as indented text, one stage at a time.
pub fn via_text(document: &Document<'_>) -> String {
    let outline = outline(document);
    let mut result = String::new();

    if let Some(directive) = &outline.directive {
        result.push_str(&format!("{} {}={}\n", "directive".dimmed(), directive.name, directive.value));
    }

    for instruction in &outline.initial {
        push_instruction(&mut result, instruction);
    }

    for (i, stage) in outline
        .stages
        .iter()
        .enumerate()
    {
        let image = stage
            .image
            .as_deref()
            .unwrap_or("?");
        match &stage.name {
            Some(name) => result.push_str(&format!(
                "{} {}: {} {} {}\n",
                "stage".bold(),
                i,
                image.bright_blue(),
                "as".dimmed(),
                name.bold()
            )),
            None => result.push_str(&format!("{} {}: {}\n", "stage".bold(), i, image.bright_blue())),
        }

        for instruction in stage
            .instructions
            .iter()
            .skip(1)
        {
            push_instruction(&mut result, instruction);
        }
    }

    result
}

fn push_instruction(result: &mut String, instruction: &InstructionOutline) {
    result.push_str(&format!(
        "    {:>4}  {} {}\n",
        instruction
            .range
            .start
            .line
            + 1,
        instruction
            .text
            .bright_green(),
        instruction
            .arguments
            .join(" ")
    ));
}
