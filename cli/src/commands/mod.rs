mod calc;
mod checklist;
mod diagnose;
mod garden;
mod guide;
mod helpers;
mod profile;
mod wizard;

pub(crate) use calc::{cmd_light, cmd_nutrients};
pub(crate) use checklist::{
    cmd_checklist_history, cmd_checklist_reset, cmd_checklist_save, cmd_checklist_set,
    cmd_checklist_show,
};
pub(crate) use diagnose::{TriageAnswers, cmd_diagnose, cmd_history};
pub(crate) use garden::{
    cmd_plan_list, cmd_plant_add, cmd_plant_list, cmd_plant_photo, cmd_plant_remove,
};
pub(crate) use guide::cmd_guide;
pub(crate) use profile::{
    cmd_export, cmd_login, cmd_logout, cmd_profile, cmd_register, cmd_rename, cmd_stats,
};
pub(crate) use wizard::cmd_recommend;
