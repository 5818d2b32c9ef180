//! Disk sizes: the cloud reports GiB, the deployer works in MiB.

pub const MIB_PER_GIB: u64 = 1024;

/// Provider size (GiB) in MiB, saturating at `u64::MAX`.
pub fn to_internal_unit(gib: u64) -> u64 {
    gib.saturating_mul(MIB_PER_GIB)
}

/// Whether a requested size no longer matches the disk the provider has.
///
/// The request is rounded up to whole GiB first, because that is what the
/// provider would have allocated for it. The comparison happens in GiB so
/// no size can overflow.
pub fn has_size_drifted(requested_mib: u64, current_gib: u64) -> bool {
    requested_mib.div_ceil(MIB_PER_GIB) != current_gib
}
