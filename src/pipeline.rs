//! Load a declaration tree, build the model, synthesize fragments.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bindsmith_config::GeneratorConfig;
use bindsmith_dispatch::plan_group;
use bindsmith_model::{DeclNode, Diagnostic, Member, Model, NamespaceId, tree};
use bindsmith_synth::{NamespaceFragment, Synthesizer};
use bindsmith_utils::Profiler;
use serde::Serialize;
use tracing::{debug, info};

/// Everything handed to the rendering layer for one run.
#[derive(Debug, Serialize)]
pub struct GenerationOutput {
    pub namespaces: Vec<NamespaceFragment>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub tree: PathBuf,
    pub namespaces: Vec<String>,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub timings: bool,
}

/// Reads a declaration tree; `.yml`/`.yaml` files are YAML, anything else
/// JSON.
pub fn load_tree(path: &Path) -> Result<Vec<DeclNode>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read declaration tree {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yml" | "yaml"));
    let roots = if is_yaml {
        tree::from_yaml(&text).with_context(|| format!("invalid YAML tree {}", path.display()))?
    } else {
        tree::from_json(&text).with_context(|| format!("invalid JSON tree {}", path.display()))?
    };
    debug!(roots = roots.len(), path = %path.display(), "declaration tree loaded");
    Ok(roots)
}

/// Synthesizes the named namespaces, or every namespace with something to
/// bind when `namespaces` is empty.
pub fn generate(model: &Model, namespaces: &[String]) -> Result<GenerationOutput> {
    let synth = Synthesizer::new(model);
    let explicit = !namespaces.is_empty();
    let ids: Vec<NamespaceId> = if explicit {
        namespaces
            .iter()
            .map(|name| model.namespace_id(name))
            .collect::<Result<_, _>>()?
    } else {
        model.namespaces().map(|ns| ns.id).collect()
    };

    let mut fragments = Vec::with_capacity(ids.len());
    for id in ids {
        let fragment = synth
            .namespace(id)
            .with_context(|| format!("failed to generate namespace `{}`", model.namespace(id).full_name()))?;
        let empty = fragment.functions.is_empty()
            && fragment.classes.is_empty()
            && fragment.constants.is_empty();
        if explicit || !empty {
            fragments.push(fragment);
        }
    }
    Ok(GenerationOutput {
        namespaces: fragments,
        diagnostics: model.diagnostics(),
    })
}

pub fn run_generate(options: &GenerateOptions) -> Result<()> {
    let mut profiler = Profiler::new();
    let config = GeneratorConfig::load(options.config.as_deref())?;
    let roots = profiler.record_phase("load", || load_tree(&options.tree))?;
    let model = profiler.record_phase("model", || Model::build(&roots, config));
    let output = profiler.record_phase("synthesize", || generate(&model, &options.namespaces))?;
    let json = serde_json::to_string_pretty(&output).context("failed to serialize fragments")?;

    match &options.out {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{json}"),
    }
    info!(
        namespaces = output.namespaces.len(),
        diagnostics = output.diagnostics.len(),
        "generation finished"
    );
    if options.timings {
        profiler.report();
    }
    Ok(())
}

/// Human-readable summary of the bindable view of `namespace`.
pub fn inspect(model: &Model, namespace: &str) -> Result<String> {
    let ns = model.namespace_id(namespace)?;
    let mut out = String::new();
    let label = model.namespace(ns).id_name();
    writeln!(out, "namespace {}", if label.as_str().is_empty() { "<global>" } else { label.as_str() })?;

    for class in model.classes(ns) {
        let names: Vec<&str> = class.names().collect();
        writeln!(out, "  class {} ({})", class.id_name(), names.join(", "))?;
        if let Some(err) = &class.directive_error {
            writeln!(out, "    skipped: {err}")?;
            continue;
        }
        if let Some(ctor) = model.bindable_constructor(class.id) {
            describe_member(model, &ctor, "    ", &mut out)?;
        }
        for member in model.bindable_members(class.id) {
            describe_member(model, member, "    ", &mut out)?;
        }
    }
    for member in &model.bindable_functions(ns) {
        describe_member(model, member, "  ", &mut out)?;
    }

    let diagnostics = model.diagnostics();
    if !diagnostics.is_empty() {
        writeln!(out, "diagnostics")?;
        for diagnostic in diagnostics {
            writeln!(out, "  {diagnostic}")?;
        }
    }
    Ok(out)
}

fn describe_member(model: &Model, member: &Member, indent: &str, out: &mut String) -> Result<()> {
    let name = model.member_name(member);
    match member {
        Member::Function { function } => {
            let declaration = model.function(*function).map_or("", |f| f.declaration.as_str());
            writeln!(out, "{indent}{name}: {declaration}")?;
        }
        Member::Group { group } => {
            writeln!(out, "{indent}{name} [{} overloads]", group.len())?;
            for (index, fref) in group.indexed() {
                if let Some(function) = model.function(fref) {
                    writeln!(out, "{indent}  #{index} {}", function.declaration)?;
                }
            }
            match plan_group(model, group) {
                Ok(tree) => {
                    for line in tree.to_string().lines() {
                        writeln!(out, "{indent}  {line}")?;
                    }
                }
                Err(err) => writeln!(out, "{indent}  not dispatchable: {err}")?,
            }
        }
    }
    Ok(())
}

pub fn run_inspect(tree: &Path, namespace: &str, config: Option<&Path>) -> Result<()> {
    let config = GeneratorConfig::load(config)?;
    let roots = load_tree(tree)?;
    let model = Model::build(&roots, config);
    print!("{}", inspect(&model, namespace)?);
    Ok(())
}
