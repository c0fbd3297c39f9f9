use crate::App;
use crate::domain::{Address, Proof, U256};
use crate::error::Result;

use super::print_json;

pub async fn list(app: &App, json: bool) -> Result<()> {
    let proposals = app.manager().get_proposals(None).await?;
    if json {
        return print_json(&proposals);
    }

    if proposals.is_empty() {
        println!("No proposals found");
        return Ok(());
    }
    for (i, proposal) in proposals.iter().enumerate() {
        println!("[{}] {}", i + 1, proposal.location);
        println!("    Author: {}", proposal.author);
        println!("    Proof:  {}", proposal.proof);
    }
    Ok(())
}

pub async fn accept(
    app: &App,
    author: Address,
    proof: Proof,
    amount: U256,
    json: bool,
) -> Result<()> {
    let outcome = app
        .manager()
        .accept_proposal(author, proof, amount, None, None, None)
        .await?;
    if json {
        print_json(&outcome)
    } else {
        println!("Transaction: {}", outcome.tx_hash);
        println!("Accepted {proof} from {author} for {amount} shares");
        Ok(())
    }
}

pub async fn propose(app: &App, iteration: &str, location: &str, json: bool) -> Result<()> {
    let outcome = app
        .contributor()
        .propose_iteration(iteration, location, None, None, None)
        .await?;
    if json {
        print_json(&outcome)
    } else {
        println!("Claim:    {}", outcome.claim.tx_hash);
        println!("Proposal: {}", outcome.proposed.tx_hash);
        println!("Proposed {} at {}", outcome.proposal.proof, outcome.proposal.location);
        Ok(())
    }
}
