use anyhow::{anyhow, bail, Context, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run a jq filter over `input` and return every output document.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| anyhow!("jq filter failed: {e:?}"))?;
        let doc = serde_json::from_str::<Value>(&v.to_string())
            .with_context(|| format!("jq produced non-JSON output: {v}"))?;
        out.push(doc);
    }
    Ok(out)
}

/// Run a jq filter that must yield exactly one document.
pub fn run_jaq_single(filter_src: &str, input: &Value) -> Result<Value> {
    let mut outputs = run_jaq(filter_src, input)?;
    match outputs.len() {
        1 => Ok(outputs.remove(0)),
        n => bail!("jq expression `{filter_src}` produced {n} documents; expected exactly one"),
    }
}

type LoadFile<'s> = load::File<&'s str, ()>;

fn format_parse_errors(errs: Vec<(LoadFile<'_>, load::Error<&str>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .map(|(file, err)| format!("cannot parse jq filter `{}`: {err:?}", file.code))
        .collect();
    anyhow!(lines.join("\n"))
}

fn format_undefined_errors(errs: Vec<(LoadFile<'_>, Vec<(&str, Undefined)>)>) -> anyhow::Error {
    let lines: Vec<String> = errs
        .into_iter()
        .flat_map(|(file, undefined)| {
            undefined
                .into_iter()
                .map(move |(name, kind)| format!("jq filter `{}` uses undefined {kind:?} `{name}`", file.code))
        })
        .collect();
    anyhow!(lines.join("\n"))
}
