/// Group id of the group this session just created, so its codes can be
/// shown again without making summaries guessable by id.
pub const GROUP_ID: &str = "group_id";
