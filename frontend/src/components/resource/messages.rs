use web_sys::File;

use common::api::{ApiFailure, ListQuery};
use common::model::pagination::ListResponse;
use common::model::record::Record;

pub enum Msg {
    Listed(ListQuery, Result<ListResponse, ApiFailure>),
    Search(String),
    GoToPage(u32),
    NextPage,
    PrevPage,

    Add,
    Edit(i64),
    EditLoaded(i64, Result<Record, ApiFailure>),
    SetField(&'static str, String),
    SetFlag(&'static str, bool),
    Cancel,
    Submit,
    Saved(Result<(), ApiFailure>),

    Delete(i64),
    Removed(i64, Result<(), ApiFailure>),

    OpenFilePicker,
    FileSelected(File),
    PreviewReady { generation: u64, data_url: String },
    RemoveAsset,
    DragOver(bool),
}
