//! Emits `VERGEN_GIT_*` variables so the binary can report the commit it was
//! built from. Builds outside a git checkout still succeed; the hash is then
//! reported as unknown.

use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let git = GitclBuilder::all_git()?;
    Emitter::default().add_instructions(&git)?.emit()?;
    Ok(())
}
