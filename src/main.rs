//! cutter's main application entry point and orchestration logic.
//! Handles command-line argument parsing, template processing flow,
//! and coordinates interactions between different modules.

use cutter::{
    cli::{get_args, Args},
    constants::CONFIG_FILE,
    context::{build_context, CoercionPolicy},
    error::{default_error_handler, Result},
    hooks::{confirm_hook_execution, HookRunner},
    loader::load_template,
    logger::init_logger,
    processor::{check_output_dir, Processor},
    prompt::{
        load_answers_from_stdin, DefaultsPrompter, DialoguerPrompter, PreloadedPrompter,
        Prompter,
    },
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves the template source, cloning git repositories
/// 2. Reads the configuration and collects answers
/// 3. Renders the template tree into the output directory
/// 4. Executes post-generation hooks
fn run(args: Args) -> Result<()> {
    let template = match args.template {
        Some(template) => template,
        None => DialoguerPrompter::new().template_source()?,
    };

    let template = load_template(&template)?;
    let output_root = match args.output_dir {
        Some(output_dir) => output_dir,
        None => std::env::current_dir()?.join(&template.name),
    };
    let output_root = std::path::absolute(output_root)?;
    check_output_dir(&template.root, &output_root)?;

    let hooks = HookRunner::new(&args.hook_pattern, &args.hook_runner)?;

    let prompt: Box<dyn Prompter> = if args.no_input {
        Box::new(DefaultsPrompter)
    } else if args.stdin {
        Box::new(PreloadedPrompter::new(load_answers_from_stdin()?))
    } else {
        Box::new(DialoguerPrompter::new())
    };
    let policy = if args.strict_answers {
        CoercionPolicy::Reject
    } else {
        CoercionPolicy::ZeroValue
    };

    let context = build_context(template.root.join(CONFIG_FILE), &*prompt, policy)?;

    let engine = MiniJinjaRenderer::new();
    Processor::new(&engine, &context, &template.root, &output_root).materialize()?;

    if !args.skip_hooks
        && confirm_hook_execution(&*prompt, &hooks, &output_root, args.skip_hooks_check)?
    {
        hooks.run_all(&template.root, &output_root, &context)?;
    }

    println!("Template generation completed successfully in {}.", output_root.display());
    Ok(())
}
