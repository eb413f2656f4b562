use color_eyre::eyre::eyre;
use color_eyre::Result;
use vx_core::{
    env_status, run_targets, scan_targets, sync_env, CommandContext, CommandGroup, CommandInfo,
    ExecutionOutcome, RunRequest, ScanRequest, SyncRequest,
};

use crate::cli::CommandCli;

pub fn dispatch_command(
    ctx: &CommandContext,
    command: &CommandCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match command {
        CommandCli::Run(args) => {
            let info = CommandInfo::new(CommandGroup::Run, "run");
            let request = RunRequest {
                files: args.files.clone(),
            };
            core_call(info, || run_targets(ctx, &request))
        }
        CommandCli::Sync(args) => {
            let info = CommandInfo::new(CommandGroup::Sync, "sync");
            let request = SyncRequest {
                files: args.files.clone(),
            };
            core_call(info, || sync_env(ctx, &request))
        }
        CommandCli::Scan(args) => {
            let info = CommandInfo::new(CommandGroup::Scan, "scan");
            let request = ScanRequest {
                files: args.files.clone(),
            };
            core_call(info, || scan_targets(ctx, &request))
        }
        CommandCli::Status => {
            let info = CommandInfo::new(CommandGroup::Status, "status");
            core_call(info, || env_status(ctx))
        }
    }
}

fn core_call(
    info: CommandInfo,
    call: impl FnOnce() -> anyhow::Result<ExecutionOutcome>,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    let outcome = call().map_err(|err| eyre!("{err:?}"))?;
    Ok((info, outcome))
}
