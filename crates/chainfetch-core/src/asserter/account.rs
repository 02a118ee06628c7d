use crate::asserter::block_identifier;
use crate::error::AssertionError;
use crate::request::AccountBalanceResponse;
use crate::types::{AccountIdentifier, Balance, BlockIdentifier, Currency};

/// Structural membership: symbol, decimals and metadata must all match.
pub fn contains_currency(currencies: &[Currency], currency: &Currency) -> bool {
    currencies.iter().any(|c| c == currency)
}

/// Structural membership, including sub-account address and metadata.
pub fn contains_account_identifier(
    identifiers: &[AccountIdentifier],
    identifier: &AccountIdentifier,
) -> bool {
    identifiers.iter().any(|i| i == identifier)
}

pub fn account_identifier(account: Option<&AccountIdentifier>) -> Result<(), AssertionError> {
    let account = account.ok_or(AssertionError::IdentifierNil("Account"))?;

    if account.address.is_empty() {
        return Err(AssertionError::FieldMissing("Account.Address"));
    }
    if let Some(sub) = &account.sub_account {
        if sub.address.is_empty() {
            return Err(AssertionError::FieldMissing("Account.SubAccount.Address"));
        }
    }
    Ok(())
}

/// Validates the block a balance was taken at and the balances themselves.
///
/// Order: block, then per entry its account and its currency set, then
/// duplicate accounts across entries.
pub fn account_balance(
    block: Option<&BlockIdentifier>,
    balances: &[Balance],
) -> Result<(), AssertionError> {
    block_identifier(block)?;

    let mut accounts: Vec<AccountIdentifier> = Vec::with_capacity(balances.len());
    for balance in balances {
        account_identifier(balance.account_identifier.as_ref())?;

        let mut currencies: Vec<Currency> = Vec::with_capacity(balance.amounts.len());
        for amount in &balance.amounts {
            if contains_currency(&currencies, &amount.currency) {
                return Err(AssertionError::DuplicateCurrencyInBalance(amount.currency.clone()));
            }
            currencies.push(amount.currency.clone());
        }

        // account_identifier() above guarantees presence.
        if let Some(account) = &balance.account_identifier {
            accounts.push(account.clone());
        }
    }

    for (i, account) in accounts.iter().enumerate() {
        if contains_account_identifier(&accounts[..i], account) {
            return Err(AssertionError::DuplicateAccountIdentifier(account.clone()));
        }
    }
    Ok(())
}

pub fn account_balance_response(resp: &AccountBalanceResponse) -> Result<(), AssertionError> {
    account_balance(resp.block_identifier.as_ref(), &resp.balances)
}
