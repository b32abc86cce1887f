use crate::domain::entities::Method;
use crate::domain::errors::AppError;
use crate::domain::value_objects::{PathComponents, QueryString};
use std::collections::HashMap;

/// Whether the token after the alias names the HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodArgument {
    /// `<alias> <method> [path...] [--flag value]...`
    Required,
    /// `<alias> [path...] [--flag value]...`, always GET.
    Absent,
}

/// Structured form of the command-line tokens following the program's own options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub alias: String,
    pub method: Method,
    pub path_components: PathComponents,
    pub options: QueryString,
}

impl Action {
    /// Tokenizes `args` into an action.
    ///
    /// Tokens before the first `--name` token are path components. After it,
    /// every token either starts a new flag or overwrites the value of the
    /// pending one; there is no way back to path components.
    pub fn parse(args: &[String], mode: MethodArgument) -> Result<Self, AppError> {
        let min_len = match mode {
            MethodArgument::Required => 2,
            MethodArgument::Absent => 1,
        };
        if args.len() < min_len {
            return Err(AppError::InvalidArgumentFormat(format!(
                "expected at least {} arguments, got {}",
                min_len,
                args.len()
            )));
        }

        let method = match mode {
            MethodArgument::Required => args[1].parse::<Method>()?,
            MethodArgument::Absent => Method::Get,
        };

        let mut path_components = Vec::with_capacity(args.len());
        let mut options = HashMap::with_capacity(args.len());
        let mut pending_flag: Option<String> = None;

        for arg in &args[min_len..] {
            if let Some(name) = arg.strip_prefix("--") {
                options.insert(name.to_string(), String::new());
                pending_flag = Some(name.to_string());
                continue;
            }

            match &pending_flag {
                Some(flag) => {
                    options.insert(flag.clone(), arg.clone());
                }
                None => path_components.push(arg.clone()),
            }
        }

        Ok(Action {
            alias: args[0].clone(),
            method,
            path_components: PathComponents(path_components),
            options: QueryString(options),
        })
    }
}
