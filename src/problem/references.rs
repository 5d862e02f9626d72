use docket::language::{Document, Keyword, Tristate, Variable};

/// Build arguments every build provides without a declaration.
const PREDEFINED: [&str; 18] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "FTP_PROXY",
    "ftp_proxy",
    "NO_PROXY",
    "no_proxy",
    "ALL_PROXY",
    "all_proxy",
    "TARGETPLATFORM",
    "TARGETOS",
    "TARGETARCH",
    "TARGETVARIANT",
    "BUILDPLATFORM",
    "BUILDOS",
    "BUILDARCH",
    "BUILDVARIANT",
];

/// Instructions whose arguments are expanded by the build itself. In the
/// others (RUN, CMD, and so on) a reference is left for the shell.
fn expands_variables(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::Add
            | Keyword::Copy
            | Keyword::Env
            | Keyword::Expose
            | Keyword::From
            | Keyword::Label
            | Keyword::Stopsignal
            | Keyword::User
            | Keyword::Volume
            | Keyword::Workdir
            | Keyword::Onbuild
    )
}

/// References, in source order, to variables that no visible ARG or ENV
/// declares.
pub fn undeclared_variables(document: &Document<'_>) -> Vec<Variable> {
    document
        .instructions()
        .into_iter()
        .filter(|instruction| expands_variables(instruction.kind()))
        .flat_map(|instruction| instruction.variables(document))
        .filter(|variable| variable.defined == Tristate::No)
        .filter(|variable| {
            !PREDEFINED.contains(
                &variable
                    .name
                    .as_str(),
            )
        })
        .collect()
}
