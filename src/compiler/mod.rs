use crate::config::Limits;
use crate::error::ConfigError;
use crate::template::{Placeholder, Template};

pub mod options;
pub mod parsing;

pub use options::*;
use parsing::{SpecParser, default_options, default_parsers};

/// A template with every placeholder expanded into its options. This is what
/// the flow state machine and the validator run against.
#[derive(Debug, Clone)]
pub struct CompiledFlow {
    pub template: Template,
    pub parameters: Vec<Parameter>,
    pub limits: Limits,
}

impl CompiledFlow {
    pub fn parameter(&self, index: usize) -> Option<&Parameter> {
        self.parameters.get(index)
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Expands a template into a `CompiledFlow`.
pub struct FlowCompiler {
    template: String,
    limits: Limits,
    parsers: Vec<Box<dyn SpecParser>>,
}

pub struct CompilerBuilder {
    template: String,
    limits: Limits,
    parsers: Vec<Box<dyn SpecParser>>,
}

impl CompilerBuilder {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            limits: Limits::default(),
            parsers: default_parsers(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Registers an additional spec format. Custom parsers are consulted before
    /// the built-in range and list parsers.
    pub fn with_spec_parser(mut self, parser: Box<dyn SpecParser>) -> Self {
        self.parsers.insert(0, parser);
        self
    }

    pub fn build(self) -> FlowCompiler {
        FlowCompiler {
            template: self.template,
            limits: self.limits,
            parsers: self.parsers,
        }
    }
}

impl FlowCompiler {
    pub fn builder(template: &str) -> CompilerBuilder {
        CompilerBuilder::new(template)
    }

    /// Compiles with the default parsers and the given limits.
    pub fn compile_with(template: &str, limits: &Limits) -> Result<CompiledFlow, ConfigError> {
        Self::builder(template)
            .with_limits(limits.clone())
            .build()
            .compile()
    }

    /// Expands a single placeholder's spec into its ordered options.
    pub fn generate_options(
        &self,
        placeholder: &Placeholder,
    ) -> Result<Vec<ParameterOption>, ConfigError> {
        let Some(spec) = placeholder.spec.as_deref() else {
            return Ok(default_options(&self.limits));
        };
        match self.parsers.iter().find(|p| p.accepts(spec)) {
            Some(parser) => parser.parse(placeholder, spec, &self.limits),
            None => Ok(default_options(&self.limits)),
        }
    }

    pub fn compile(self) -> Result<CompiledFlow, ConfigError> {
        let template = Template::parse(&self.template)?;
        let count = template.len();

        let parameters = template
            .placeholders()
            .iter()
            .map(|placeholder| {
                let mut options = self.generate_options(placeholder)?;
                if options.is_empty() {
                    return Err(ConfigError::EmptyOptionSet {
                        placeholder: placeholder.expression.clone(),
                    });
                }
                let next = Some(placeholder.index + 1).filter(|n| *n < count);
                for option in &mut options {
                    option.next = if option.direct_roll { None } else { next };
                }
                Ok(Parameter {
                    placeholder: placeholder.clone(),
                    options,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(CompiledFlow {
            template,
            parameters,
            limits: self.limits,
        })
    }
}
