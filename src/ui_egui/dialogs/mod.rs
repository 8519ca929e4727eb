pub mod summary_dialog;
