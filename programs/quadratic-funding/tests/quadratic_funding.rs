use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use ledger_runtime::{Ledger, Transaction, SYSTEM_PROGRAM_ID};
use quadratic_funding::{
    CastVote, Dao, FinalizeProposal, InitDao, InitProposal, Proposal, ProposalState,
    QuadraticFunding, QuadraticFundingInstruction, Vote, VoteType,
};

const DAO_NAME: &str = "public-goods";
const VOTER_TOKENS: u64 = 100_000_000;

struct TestSetup {
    ledger: Ledger,
    creator: Pubkey,
    mint: Pubkey,
    voter: Pubkey,
    dao: Pubkey,
}

fn setup() -> TestSetup {
    let mut ledger = Ledger::new().with_program(QuadraticFunding);
    let creator = Pubkey::new_unique();
    let voter = Pubkey::new_unique();
    let mint = Pubkey::new_unique();

    ledger.fund(&creator, 10_000_000_000).unwrap();
    ledger.fund(&voter, 1_000_000_000).unwrap();
    ledger.create_mint(&mint, &creator, 6).unwrap();
    ledger.mint_to(&mint, &voter, VOTER_TOKENS).unwrap();

    let mut setup = TestSetup {
        ledger,
        creator,
        mint,
        voter,
        dao: Dao::address(&creator, DAO_NAME).unwrap().0,
    };
    setup.init_dao(DAO_NAME).unwrap();
    setup
}

fn assert_error(result: Result<()>, name: &str) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(err)) => assert_eq!(err.error_name, name),
        other => panic!("expected {name}, got {other:?}"),
    }
}

impl TestSetup {
    fn send(&mut self, instruction: Instruction, signer: Pubkey) -> Result<()> {
        self.ledger
            .process_transaction(&Transaction::new(vec![instruction], &[signer]))
    }

    fn init_dao(&mut self, name: &str) -> Result<()> {
        let ix = InitDao::instruction(self.creator, name, self.mint).unwrap();
        self.send(ix, self.creator)
    }

    fn init_proposal(&mut self, metadata: &str) -> Result<Pubkey> {
        let proposal_id = self.dao_state().proposal_count;
        let ix = InitProposal::instruction(self.creator, self.dao, proposal_id, metadata).unwrap();
        self.send(ix, self.creator)?;
        Ok(Proposal::address(&self.dao, proposal_id).unwrap().0)
    }

    fn vote(&mut self, voter: Pubkey, proposal: Pubkey, vote_type: u8) -> Result<()> {
        let ix = CastVote::new(voter, self.dao, proposal, &self.mint)
            .unwrap()
            .instruction(vote_type)
            .unwrap();
        self.send(ix, voter)
    }

    fn finalize(&mut self, proposal: Pubkey) -> Result<()> {
        let ix = FinalizeProposal::new(self.creator, self.dao, proposal)
            .instruction()
            .unwrap();
        self.send(ix, self.creator)
    }

    fn new_voter(&mut self, tokens: u64) -> Pubkey {
        let voter = Pubkey::new_unique();
        self.ledger.fund(&voter, 1_000_000_000).unwrap();
        self.ledger.mint_to(&self.mint, &voter, tokens).unwrap();
        voter
    }

    fn dao_state(&self) -> Dao {
        self.ledger.load(&self.dao).unwrap()
    }

    fn proposal_state(&self, proposal: &Pubkey) -> Proposal {
        self.ledger.load(proposal).unwrap()
    }
}

#[test]
fn test_init_dao() {
    let setup = setup();

    let dao = setup.dao_state();
    assert_eq!(dao.name, DAO_NAME);
    assert_eq!(dao.authority, setup.creator);
    assert_eq!(dao.mint, setup.mint);
    assert_eq!(dao.proposal_count, 0);
}

#[test]
fn test_init_dao_twice_fails() {
    let mut setup = setup();

    assert_error(setup.init_dao(DAO_NAME), "AccountAlreadyInUse");
}

#[test]
fn test_same_name_under_another_creator_is_a_new_dao() {
    let mut setup = setup();
    let other = Pubkey::new_unique();
    setup.ledger.fund(&other, 1_000_000_000).unwrap();

    let ix = InitDao::instruction(other, DAO_NAME, setup.mint).unwrap();
    setup.send(ix, other).unwrap();

    let address = Dao::address(&other, DAO_NAME).unwrap().0;
    assert_ne!(address, setup.dao);
    let dao: Dao = setup.ledger.load(&address).unwrap();
    assert_eq!(dao.authority, other);
}

#[test]
fn test_init_dao_rejects_bad_names() {
    let mut setup = setup();

    assert_error(setup.init_dao(""), "InvalidDaoName");

    // Too long to derive an address from, so build the instruction by hand.
    let ix = Instruction {
        program_id: quadratic_funding::ID,
        accounts: vec![
            AccountMeta::new(setup.creator, true),
            AccountMeta::new(Pubkey::new_unique(), false),
            AccountMeta::new_readonly(setup.mint, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: QuadraticFundingInstruction::InitDao {
            name: "n".repeat(33),
        }
        .data()
        .unwrap(),
    };
    assert_error(setup.send(ix, setup.creator), "InvalidDaoName");
}

#[test]
fn test_init_dao_requires_a_mint() {
    let mut setup = setup();
    let not_a_mint = setup.voter;

    let ix = InitDao::instruction(setup.creator, "second", not_a_mint).unwrap();
    assert_error(setup.send(ix, setup.creator), "InvalidMint");
}

#[test]
fn test_proposals_are_numbered_from_the_count() {
    let mut setup = setup();

    let first = setup.init_proposal("fund the docs").unwrap();
    let second = setup.init_proposal("fund the indexer").unwrap();

    assert_eq!(first, Proposal::address(&setup.dao, 0).unwrap().0);
    assert_eq!(second, Proposal::address(&setup.dao, 1).unwrap().0);
    assert_eq!(setup.dao_state().proposal_count, 2);

    let proposal = setup.proposal_state(&second);
    assert_eq!(proposal.proposal_id, 1);
    assert_eq!(proposal.dao, setup.dao);
    assert_eq!(proposal.authority, setup.creator);
    assert_eq!(proposal.metadata, "fund the indexer");
    assert_eq!(proposal.yes_vote_count, 0);
    assert_eq!(proposal.no_vote_count, 0);
    assert_eq!(proposal.state, ProposalState::Active);
}

#[test]
fn test_only_authority_creates_proposals() {
    let mut setup = setup();
    let outsider = setup.voter;

    let ix = InitProposal::instruction(outsider, setup.dao, 0, "hijack").unwrap();
    assert_error(setup.send(ix, outsider), "UnauthorizedProposalCreation");
    assert_eq!(setup.dao_state().proposal_count, 0);
}

#[test]
fn test_metadata_limit() {
    let mut setup = setup();

    assert_error(
        setup.init_proposal(&"x".repeat(201)).map(|_| ()),
        "MetadataTooLong",
    );
    setup.init_proposal(&"x".repeat(200)).unwrap();
}

#[test]
fn test_vote_credits_are_square_root_of_balance() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    setup.vote(setup.voter, proposal, 1).unwrap();

    let vote: Vote = setup
        .ledger
        .load(&Vote::address(&setup.voter, &proposal).unwrap().0)
        .unwrap();
    assert_eq!(vote.authority, setup.voter);
    assert_eq!(vote.vote_type, VoteType::Yes);
    assert_eq!(vote.vote_credits, 10_000);

    let state = setup.proposal_state(&proposal);
    assert_eq!(state.yes_vote_count, 10_000);
    assert_eq!(state.no_vote_count, 0);
}

#[test]
fn test_double_vote_fails() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    setup.vote(setup.voter, proposal, 1).unwrap();
    assert_error(setup.vote(setup.voter, proposal, 0), "AccountAlreadyInUse");

    let state = setup.proposal_state(&proposal);
    assert_eq!(state.yes_vote_count, 10_000);
    assert_eq!(state.no_vote_count, 0);
}

#[test]
fn test_invalid_vote_type() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    assert_error(setup.vote(setup.voter, proposal, 2), "InvalidVoteType");
}

#[test]
fn test_quadratic_tally_favours_many_small_holders() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    // One whale with 100M units against five holders of 9M units each.
    setup.vote(setup.voter, proposal, 0).unwrap();
    for _ in 0..5 {
        let small = setup.new_voter(9_000_000);
        setup.vote(small, proposal, 1).unwrap();
    }

    let state = setup.proposal_state(&proposal);
    assert_eq!(state.no_vote_count, 10_000);
    assert_eq!(state.yes_vote_count, 5 * 3_000);

    setup.finalize(proposal).unwrap();
    assert_eq!(setup.proposal_state(&proposal).state, ProposalState::Passed);
}

#[test]
fn test_votes_after_finalize_fail() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();
    setup.vote(setup.voter, proposal, 0).unwrap();

    setup.finalize(proposal).unwrap();
    assert_eq!(setup.proposal_state(&proposal).state, ProposalState::Rejected);

    let late = setup.new_voter(1_000_000);
    assert_error(setup.vote(late, proposal, 1), "ProposalNotActive");
    assert_error(setup.finalize(proposal), "ProposalNotActive");
}

#[test]
fn test_only_authority_finalizes() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    let ix = FinalizeProposal::new(setup.voter, setup.dao, proposal)
        .instruction()
        .unwrap();
    assert_error(setup.send(ix, setup.voter), "UnauthorizedDaoAuthority");
}

#[test]
fn test_token_account_must_match_dao_mint() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();

    let other_mint = Pubkey::new_unique();
    setup.ledger.create_mint(&other_mint, &setup.creator, 6).unwrap();
    let other_account = setup
        .ledger
        .mint_to(&other_mint, &setup.voter, VOTER_TOKENS)
        .unwrap();

    let ix = CastVote::with_token_account(setup.voter, setup.dao, proposal, other_account)
        .unwrap()
        .instruction(1)
        .unwrap();
    assert_error(setup.send(ix, setup.voter), "InvalidMint");
}

#[test]
fn test_token_account_must_belong_to_voter() {
    let mut setup = setup();
    let proposal = setup.init_proposal("fund the docs").unwrap();
    let borrower = setup.new_voter(0);

    let voter_tokens =
        anchor_spl::associated_token::get_associated_token_address(&setup.voter, &setup.mint);
    let ix = CastVote::with_token_account(borrower, setup.dao, proposal, voter_tokens)
        .unwrap()
        .instruction(1)
        .unwrap();
    assert_error(setup.send(ix, borrower), "InvalidTokenAccount");
}

#[test]
fn test_proposal_must_belong_to_dao() {
    let mut setup = setup();
    setup.init_proposal("fund the docs").unwrap();

    setup.init_dao("other").unwrap();
    let other_dao = Dao::address(&setup.creator, "other").unwrap().0;
    let ix = InitProposal::instruction(setup.creator, other_dao, 0, "elsewhere").unwrap();
    setup.send(ix, setup.creator).unwrap();
    let foreign = Proposal::address(&other_dao, 0).unwrap().0;

    assert_error(setup.vote(setup.voter, foreign, 1), "InvalidDao");
}
