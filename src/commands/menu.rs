//! Interactive tool selection

use inquire::MultiSelect;

use crate::error::Result;
use crate::manifest::ToolDescriptor;

/// Select tools interactively from manifest entries. Returns the chosen
/// names; an escaped/cancelled prompt returns an empty selection.
pub fn select_tools_interactively(tools: &[ToolDescriptor]) -> Result<Vec<String>> {
    if tools.is_empty() {
        return Ok(vec![]);
    }

    // Single-line items only: multi-line content breaks inquire's list
    // layout and makes the filter match descriptions.
    let items: Vec<String> = tools
        .iter()
        .map(|t| match t.description {
            Some(ref description) => format!("{} - {}", t.name, description),
            None => t.name.clone(),
        })
        .collect();

    println!();

    let selection = match MultiSelect::new("Select tools to install", items)
        .with_page_size(10)
        .with_help_message(
            "  ↑↓ navigate  space select  enter confirm  type to filter  q/esc cancel",
        )
        .prompt_skippable()?
    {
        Some(selection) => selection,
        None => return Ok(vec![]),
    };

    let names = selection
        .iter()
        .filter_map(|item| {
            let name = item.split(" - ").next().unwrap_or(item);
            tools
                .iter()
                .find(|t| t.name == name)
                .map(|t| t.name.clone())
        })
        .collect();

    Ok(names)
}
