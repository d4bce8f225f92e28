use anyhow::Result;

use crate::selector::selector_of;

pub fn run(signatures: &[String]) -> Result<()> {
	for sig in signatures {
		let selector = selector_of(sig)?;
		println!("{selector}  {sig}");
	}
	Ok(())
}
