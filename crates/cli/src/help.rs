//! Usage and detailed help text built from the declarations.

use itertools::Itertools;

use parmsets_core::{Parameter, Parameters};

use crate::declarations::ProgramDeclaration;

const RULE_WIDTH: usize = 70;

/// `-?` output: one usage line per set, then each parameter's short help.
pub fn usage_string(declaration: &ProgramDeclaration, parameters: &Parameters, padding: usize) -> String {
    let padding = padding.max(1);
    let mut usage = String::new();

    if let Some(description) = &declaration.description {
        usage.push_str(&format!("{} - {description}\n\n", declaration.program));
    }
    for set in parameters.sets() {
        usage.push_str(&format!("{} {}\n", declaration.program, set.usage_summary()));
    }

    usage.push_str("\nParameters:\n");
    for parameter in parameters.parameters() {
        let short = parameter.help().map(|help| help.short.as_str()).unwrap_or("");
        usage.push_str(&format!("{:<padding$} - {short}\n", parameter.name()));
    }
    usage.push_str("\nUse -?? for detailed help.\n");
    usage
}

fn mappings(parameters: &Parameters, parameter: &Parameter) -> String {
    parameters
        .sets()
        .iter()
        .filter_map(|set| {
            set.find_by_name(parameter.name()).map(|member| {
                let position = member
                    .position()
                    .map_or_else(|| "named".to_string(), |position| position.to_string());
                format!("{}({position})", set.display_name())
            })
        })
        .join(",")
}

fn validator_lines(parameter: &Parameter) -> Vec<String> {
    let validators = parameter.validators();
    let mut lines = Vec::new();

    if let Some(length) = &validators.length {
        lines.push(format!(
            "[Val Length=({}-{})]",
            length.range.min, length.range.max
        ));
    }
    if let Some(count) = &validators.count {
        lines.push(format!("[Val Count=({}-{})]", count.min, count.max));
    }
    if let Some(pattern) = &validators.pattern {
        lines.push(format!("[Val Pattern={}]", pattern.as_str()));
    }
    if let Some(set) = &validators.set {
        lines.push(format!("[Valid Set=({})]", set.values.iter().join(",")));
    }
    if let Some(range) = &validators.range {
        lines.push(format!("[Val Range=({}-{})]", range.min(), range.max()));
    }
    lines
}

/// `-??` and `-help` output.
pub fn detailed_help(declaration: &ProgramDeclaration, parameters: &Parameters) -> String {
    let mut lines: Vec<String> = vec![
        format!("{} Help", declaration.program),
        "=".repeat(RULE_WIDTH),
    ];

    if let Some(copyright) = &declaration.copyright {
        lines.push(copyright.clone());
    }
    if let Some(home) = &declaration.home {
        lines.push(format!("Web Site: {home}"));
    }
    if let Some(version) = &declaration.version {
        lines.push(format!("Version : {version}"));
    }
    if let Some(long_description) = &declaration.long_description {
        lines.push(long_description.clone());
    }

    lines.push(String::new());
    lines.push("Parameters".to_string());
    lines.push("-".repeat(RULE_WIDTH));

    for parameter in parameters.parameters() {
        lines.push(format!("-{}", parameter.name()));
        lines.push(format!("[{}]", parameter.value_type()));
        if parameter.is_switch() {
            lines.push("[Switch]".to_string());
        }
        if parameter.is_mandatory() {
            lines.push("[Mandatory]".to_string());
        }
        lines.push(format!("[Mappings:{}]", mappings(parameters, parameter)));
        lines.extend(validator_lines(parameter));
        if let Some(prompt) = parameter.prompt() {
            lines.push(format!("[Prompt='{}']", prompt.text));
        }
        if let Some(long) = parameter.help().and_then(|help| help.long.as_ref()) {
            lines.push(long.clone());
        }
        lines.push(String::new());
    }

    if let Some(example) = &declaration.example {
        lines.push(example.clone());
    }

    let mut help = lines.join("\n");
    help.push('\n');
    help
}

/// `-version` output.
pub fn version_string(declaration: &ProgramDeclaration) -> String {
    match &declaration.version {
        Some(version) => format!("{} {version}", declaration.program),
        None => declaration.program.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parmsets_core::value::{ScalarType, ValueType};
    use parmsets_core::{Attribute, ParameterDefinition};

    fn declaration() -> ProgramDeclaration {
        ProgramDeclaration {
            program: "deploy".to_string(),
            version: Some("1.2.0".to_string()),
            description: None,
            long_description: Some("Deploys things.".to_string()),
            copyright: None,
            home: Some("https://example.org".to_string()),
            example: Some("deploy web01".to_string()),
            default_set: None,
            parameters: vec![
                ParameterDefinition::new("Target", ValueType::STRING)
                    .at_position(0)
                    .mandatory()
                    .with(Attribute::length(1, 20))
                    .with(Attribute::help("Host to deploy to")),
                ParameterDefinition::new("Count", ValueType::Scalar(ScalarType::Int))
                    .with(Attribute::range(1, 10)),
                ParameterDefinition::switch("Force").in_set("Forced"),
                ParameterDefinition::new("Target", ValueType::STRING).in_set("Forced"),
            ],
        }
    }

    #[test]
    fn test_usage_string() {
        let declaration = declaration();
        let parameters = declaration.build_parameters().unwrap();
        let usage = usage_string(&declaration, &parameters, 8);
        assert_eq!(
            usage,
            "deploy -Target <string> [-Count <int>]\n\
             deploy [-Force] [-Target <string>]\n\
             \n\
             Parameters:\n\
             Count    - \n\
             Force    - \n\
             Target   - Host to deploy to\n\
             \n\
             Use -?? for detailed help.\n"
        );
    }

    #[test]
    fn test_usage_string_leads_with_description() {
        let declaration = ProgramDeclaration {
            description: Some("Copies builds to hosts".to_string()),
            ..declaration()
        };
        let parameters = declaration.build_parameters().unwrap();
        let usage = usage_string(&declaration, &parameters, 8);
        assert!(usage.starts_with("deploy - Copies builds to hosts\n\ndeploy -Target <string>"));
    }

    #[test]
    fn test_detailed_help_lists_mappings_and_validators() {
        let declaration = declaration();
        let parameters = declaration.build_parameters().unwrap();
        let help = detailed_help(&declaration, &parameters);

        assert!(help.starts_with("deploy Help\n===="));
        assert!(help.contains("Web Site: https://example.org\n"));
        assert!(help.contains("Version : 1.2.0\n"));
        assert!(help.contains("-Target\n[string]\n[Mandatory]\n[Mappings:Default(0),Forced(named)]\n[Val Length=(1-20)]\n"));
        assert!(help.contains("-Count\n[int]\n[Mappings:Default(named)]\n[Val Range=(1-10)]\n"));
        assert!(help.contains("-Force\n[bool]\n[Switch]\n[Mappings:Forced(named)]\n"));
        assert!(help.ends_with("deploy web01\n"));
    }

    #[test]
    fn test_version_string() {
        assert_eq!(version_string(&declaration()), "deploy 1.2.0");
    }
}
