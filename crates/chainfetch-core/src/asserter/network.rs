use crate::asserter::{block_identifier, errors};
use crate::error::AssertionError;
use crate::request::{NetworkListResponse, NetworkOptionsResponse, NetworkStatusResponse};
use crate::types::{NetworkIdentifier, Options, Peer, Version};

/// Blockchain and network must be set, as must a present sub-network's name.
pub fn network_identifier(network: Option<&NetworkIdentifier>) -> Result<(), AssertionError> {
    let network = network.ok_or(AssertionError::IdentifierNil("NetworkIdentifier"))?;

    if network.blockchain.is_empty() {
        return Err(AssertionError::FieldMissing("NetworkIdentifier.Blockchain"));
    }
    if network.network.is_empty() {
        return Err(AssertionError::FieldMissing("NetworkIdentifier.Network"));
    }
    if let Some(sub) = &network.sub_network_identifier {
        if sub.network.is_empty() {
            return Err(AssertionError::FieldMissing(
                "NetworkIdentifier.SubNetworkIdentifier.Network",
            ));
        }
    }
    Ok(())
}

pub fn peer(peer: Option<&Peer>) -> Result<(), AssertionError> {
    let peer = peer.ok_or(AssertionError::IdentifierNil("Peer"))?;

    if peer.peer_id.is_empty() {
        return Err(AssertionError::FieldMissing("Peer.PeerID"));
    }
    Ok(())
}

/// A present middleware version must not be empty.
pub fn version(version: Option<&Version>) -> Result<(), AssertionError> {
    let version = version.ok_or(AssertionError::IdentifierNil("Version"))?;

    if version.node_version.is_empty() {
        return Err(AssertionError::FieldMissing("Version.NodeVersion"));
    }
    if matches!(version.middleware_version.as_deref(), Some("")) {
        return Err(AssertionError::FieldMissing("Version.MiddlewareVersion"));
    }
    Ok(())
}

/// Checked in order: statuses present, one of them successful, types present.
pub fn network_options(options: Option<&Options>) -> Result<(), AssertionError> {
    let options = options.ok_or(AssertionError::IdentifierNil("Options"))?;

    if options.operation_statuses.is_empty() {
        return Err(AssertionError::Empty("Options.OperationStatuses"));
    }
    if !options.operation_statuses.iter().any(|s| s.successful) {
        return Err(AssertionError::NoSuccessfulStatus);
    }
    if options.operation_types.is_empty() {
        return Err(AssertionError::Empty("Options.OperationTypes"));
    }
    Ok(())
}

pub fn network_list_response(resp: &NetworkListResponse) -> Result<(), AssertionError> {
    for (i, network) in resp.network_identifiers.iter().enumerate() {
        network_identifier(Some(network))?;
        if resp.network_identifiers[..i].contains(network) {
            return Err(AssertionError::DuplicateNetworkIdentifier(network.clone()));
        }
    }
    Ok(())
}

pub fn network_options_response(resp: &NetworkOptionsResponse) -> Result<(), AssertionError> {
    version(resp.version.as_ref())?;
    network_options(resp.allow.as_ref())?;
    if let Some(allow) = &resp.allow {
        errors(&allow.errors)?;
    }
    Ok(())
}

pub fn network_status_response(resp: &NetworkStatusResponse) -> Result<(), AssertionError> {
    block_identifier(resp.current_block_identifier.as_ref())?;
    if resp.current_block_timestamp < 0 {
        return Err(AssertionError::NegativeTimestamp);
    }
    block_identifier(resp.genesis_block_identifier.as_ref())?;
    for p in &resp.peers {
        peer(Some(p))?;
    }
    Ok(())
}
