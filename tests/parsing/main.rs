mod directives;
mod documents;
mod properties;
mod resolver;
mod samples;
